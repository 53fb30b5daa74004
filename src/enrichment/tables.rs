//! Ordered keyword tables. Within a table the first row with a matching keyword wins,
//! so rows for more specific places sit above broader ones.
//! All keywords are lowercase, destinations are lowercased before lookup.

use super::{DestinationCode, DestinationPopularity, DestinationRegion};

pub type KeywordTable<T> = &'static [(&'static [&'static str], T)];

pub const DESTINATION_CODES: KeywordTable<DestinationCode> = &[
    (
        &["dominicana", "punta cana", "santo domingo"],
        DestinationCode::DomRep,
    ),
    (
        &["méxico", "mexico", "cancún", "cancun", "tulum"],
        DestinationCode::Mexico,
    ),
    (&["parís", "paris"], DestinationCode::Paris),
    (&["madrid"], DestinationCode::Madrid),
    (&["barcelona"], DestinationCode::Barcelona),
    (&["roma", "rome"], DestinationCode::Rome),
    (&["londres", "london"], DestinationCode::London),
    (&["nueva york", "new york"], DestinationCode::NewYork),
    (&["miami"], DestinationCode::Miami),
    (&["orlando"], DestinationCode::Orlando),
    (&["bogotá", "bogota", "cartagena", "medellín", "medellin"], DestinationCode::Colombia),
    (&["buenos aires", "argentina"], DestinationCode::Argentina),
    (&["perú", "peru", "cusco"], DestinationCode::Peru),
    (&["tokio", "tokyo"], DestinationCode::Tokyo),
    (&["dubái", "dubai"], DestinationCode::Dubai),
];

/// Region keywords for quick alerts.
pub const QUICK_ALERT_REGIONS: KeywordTable<DestinationRegion> = &[
    (
        &[
            "méxico", "mexico", "cancún", "cancun", "dominicana", "punta cana", "colombia",
            "bogotá", "bogota", "cartagena", "perú", "peru", "argentina", "buenos aires",
            "chile", "brasil", "brazil", "costa rica", "panamá", "panama", "cuba",
        ],
        DestinationRegion::LatinAmerica,
    ),
    (
        &[
            "españa", "spain", "madrid", "barcelona", "parís", "paris", "francia", "france",
            "roma", "rome", "italia", "italy", "londres", "london", "portugal", "lisboa",
            "alemania", "germany", "amsterdam", "grecia", "greece",
        ],
        DestinationRegion::Europe,
    ),
    (
        &[
            "japón", "japan", "tokio", "tokyo", "china", "tailandia", "thailand", "bali",
            "corea", "korea", "vietnam", "singapur", "singapore", "india",
        ],
        DestinationRegion::Asia,
    ),
    (
        &[
            "dubái", "dubai", "egipto", "egypt", "marruecos", "morocco", "turquía", "turkey",
            "israel", "sudáfrica", "south africa", "kenia", "kenya",
        ],
        DestinationRegion::MiddleEastAfrica,
    ),
    (
        &["australia", "sydney", "nueva zelanda", "new zealand", "fiji"],
        DestinationRegion::Oceania,
    ),
];

/// Region keywords for custom alerts. Overlaps with the quick alert table
/// but the memberships are not identical.
pub const CUSTOM_ALERT_REGIONS: KeywordTable<DestinationRegion> = &[
    (
        &[
            "méxico", "mexico", "cancún", "cancun", "dominicana", "punta cana", "colombia",
            "perú", "peru", "argentina", "chile", "brasil", "brazil", "costa rica", "ecuador",
            "guatemala", "uruguay",
        ],
        DestinationRegion::LatinAmerica,
    ),
    (
        &[
            "españa", "spain", "madrid", "barcelona", "parís", "paris", "francia", "france",
            "roma", "rome", "italia", "italy", "londres", "london", "europa", "europe",
            "suiza", "switzerland",
        ],
        DestinationRegion::Europe,
    ),
    (
        &[
            "japón", "japan", "tokio", "tokyo", "china", "tailandia", "thailand", "asia",
            "filipinas", "philippines", "indonesia",
        ],
        DestinationRegion::Asia,
    ),
    (
        &[
            "dubái", "dubai", "emiratos", "qatar", "egipto", "egypt", "marruecos", "morocco",
            "áfrica", "africa",
        ],
        DestinationRegion::MiddleEastAfrica,
    ),
    (
        &["australia", "nueva zelanda", "new zealand", "oceanía", "oceania"],
        DestinationRegion::Oceania,
    ),
];

pub const POPULARITY_TIERS: KeywordTable<DestinationPopularity> = &[
    (
        &[
            "cancún", "cancun", "punta cana", "miami", "orlando", "nueva york", "new york",
            "madrid", "barcelona", "parís", "paris",
        ],
        DestinationPopularity::Tier1High,
    ),
    (
        &[
            "maldivas", "maldives", "bali", "bora bora", "santorini", "tokio", "tokyo",
            "dubái", "dubai", "islandia", "iceland", "australia", "nueva zelanda",
            "new zealand",
        ],
        DestinationPopularity::Tier3Aspirational,
    ),
];
