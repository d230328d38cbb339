//! Canonical Indian states and union territories plus their known aliases.

/// Canonical spellings, states first, then union territories.
///
/// Order matters: the substring fallback returns the first match.
pub const CANONICAL_REGIONS: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Exact-match aliases: regional scripts and legacy English names.
pub const REGION_ALIASES: &[(&str, &str)] = &[
    // Devanagari (Hindi / Marathi)
    ("आंध्र प्रदेश", "Andhra Pradesh"),
    ("अरुणाचल प्रदेश", "Arunachal Pradesh"),
    ("असम", "Assam"),
    ("बिहार", "Bihar"),
    ("छत्तीसगढ़", "Chhattisgarh"),
    ("गोवा", "Goa"),
    ("गुजरात", "Gujarat"),
    ("हरियाणा", "Haryana"),
    ("हिमाचल प्रदेश", "Himachal Pradesh"),
    ("झारखंड", "Jharkhand"),
    ("झारखण्ड", "Jharkhand"),
    ("कर्नाटक", "Karnataka"),
    ("केरल", "Kerala"),
    ("केरळ", "Kerala"),
    ("मध्य प्रदेश", "Madhya Pradesh"),
    ("महाराष्ट्र", "Maharashtra"),
    ("मणिपुर", "Manipur"),
    ("मेघालय", "Meghalaya"),
    ("मिज़ोरम", "Mizoram"),
    ("मिजोरम", "Mizoram"),
    ("नागालैंड", "Nagaland"),
    ("ओडिशा", "Odisha"),
    ("ओड़िशा", "Odisha"),
    ("पंजाब", "Punjab"),
    ("राजस्थान", "Rajasthan"),
    ("सिक्किम", "Sikkim"),
    ("तमिलनाडु", "Tamil Nadu"),
    ("तमिल नाडु", "Tamil Nadu"),
    ("तेलंगाना", "Telangana"),
    ("त्रिपुरा", "Tripura"),
    ("उत्तर प्रदेश", "Uttar Pradesh"),
    ("उत्तराखंड", "Uttarakhand"),
    ("उत्तराखण्ड", "Uttarakhand"),
    ("पश्चिम बंगाल", "West Bengal"),
    ("चंडीगढ़", "Chandigarh"),
    ("दिल्ली", "Delhi"),
    ("जम्मू और कश्मीर", "Jammu and Kashmir"),
    ("जम्मू आणि काश्मीर", "Jammu and Kashmir"),
    ("लद्दाख", "Ladakh"),
    ("लक्षद्वीप", "Lakshadweep"),
    ("पुडुचेरी", "Puducherry"),
    // Other regional scripts
    ("தமிழ்நாடு", "Tamil Nadu"),
    ("తెలంగాణ", "Telangana"),
    ("ఆంధ్ర ప్రదేశ్", "Andhra Pradesh"),
    ("ಕರ್ನಾಟಕ", "Karnataka"),
    ("കേരളം", "Kerala"),
    ("পশ্চিমবঙ্গ", "West Bengal"),
    ("অসম", "Assam"),
    ("ગુજરાત", "Gujarat"),
    ("ਪੰਜਾਬ", "Punjab"),
    ("ଓଡ଼ିଶା", "Odisha"),
    // Legacy and long-form English names
    ("Orissa", "Odisha"),
    ("Uttaranchal", "Uttarakhand"),
    ("Pondicherry", "Puducherry"),
    ("NCT of Delhi", "Delhi"),
    ("National Capital Territory of Delhi", "Delhi"),
    ("New Delhi", "Delhi"),
    ("Jammu & Kashmir", "Jammu and Kashmir"),
    ("Andaman & Nicobar Islands", "Andaman and Nicobar Islands"),
    ("Dadra and Nagar Haveli", "Dadra and Nagar Haveli and Daman and Diu"),
    ("Daman and Diu", "Dadra and Nagar Haveli and Daman and Diu"),
];
