// Station code → place name mapping
// Source: Global Survey site list (maintained by hand; the GeoJSON feeds
// carry receiver model names in `Site Name`, not localities)

/// Human-readable locality for each known mountpoint code
pub const STATION_LOCATIONS: &[(&str, &str)] = &[
    // North Island
    ("KTIA", "Kaitaia"),
    ("GSKK", "Kerikeri"),
    ("GSWR", "Whangarei CBD"),
    ("WHNG", "Whangarei"),
    ("GSDR", "Dargaville"),
    ("GSMH", "Mangawhai Heads"),
    ("WARK", "Warkworth"),
    ("GSSB", "Shelly Beach"),
    ("AUCK", "Whangaparaoa"),
    ("GSAL", "Albany"),
    ("CORM", "Coromandel"),
    ("GSUT", "Waterview"),
    ("GSBL", "Beachlands"),
    ("GSAA", "Auckland Airport"),
    ("GSTN", "Takanini"),
    ("GSTH", "Thames"),
    ("GSWI", "Waiuku"),
    ("GSWH", "Waihi"),
    ("GSTK", "Te Kauwhata"),
    ("HIKB", "Hicks Bay"),
    ("TRNG", "Papamoa"),
    ("GSHT", "Hamilton CBD"),
    ("HAMT", "Whatawhata"),
    ("GSCA", "Cambridge"),
    ("WHKT", "Whakatane"),
    ("GSPU", "Putaruru"),
    ("GSRO", "Rotorua"),
    ("MAHO", "Mahoenui"),
    ("RGAR", "Broadlands"),
    ("ARTA", "Aratiatia Dam"),
    ("GISB", "Patutahi"),
    ("TAUP", "Taupo"),
    ("NPLY", "New Plymouth"),
    ("VGMT", "Ohakune"),
    ("HAST", "Hastings"),
    ("GSHW", "Hawera"),
    ("WANG", "Wanganui"),
    ("DNVK", "Dannevirke"),
    ("GSPN", "Palmerston North"),
    ("GSWF", "Welsford"),
    // South Island
    ("GLDB", "Golden Bay"),
    ("TKHL", "Takaka Hill"),
    ("NLSN", "Cable Bay"),
    ("GSNE", "Stoke"),
    ("GSBN", "Blenheim"),
    ("WRAU", "Wairau Valley"),
    ("WEST", "Waimangaroa"),
    ("CMBL", "Cape Campbell"),
    ("GSCR", "Clarence"),
    ("KAIK", "Kaikoura"),
    ("HANM", "Hanmer Springs"),
    ("MRBL", "Marble Point"),
    ("HOKI", "Hokitika"),
    ("LKTA", "Lake Taylor"),
    ("GSCT", "Cheviot"),
    ("GSAM", "Amberley"),
    ("GSOX", "Oxford"),
    ("GSJV", "Mairehau"),
    ("YALD", "Yaldhurst"),
    ("GSCC", "Christchurch City"),
    ("METH", "Methven"),
    ("MQZG", "McQueens Valley"),
    ("GSLI", "Little River"),
    ("GSAB", "Ashburton"),
    ("MTJO", "Mount John"),
    ("HAAS", "Haast"),
    ("GSTW", "Twizel"),
    ("GSTI", "Timaru"),
    ("WAIM", "Waimate"),
    ("GSLW", "Wanaka"),
    ("GSQU", "Queenstown"),
    ("GSOM", "Oamaru"),
    ("LEXA", "Alexandra"),
    ("MALV", "Mavora Lakes"),
    ("DUND", "Dunedin"),
    ("GSGR", "Gore"),
    ("GSRA", "Ranfurly"),
    ("SCTB", "Scott Base"),
    ("CHTI", "Chatham Islands"),
    ("BLUF", "Bluff"),
];
