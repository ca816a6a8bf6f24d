use tracing::debug;

/// A cuisine label and the lowercase phrases that point to it.
#[derive(Debug, Clone, Copy)]
pub struct CuisineKeywords<'a> {
    pub label: &'a str,
    pub keywords: &'a [&'a str],
}

/// Built-in keyword table. Declaration order breaks ties, so a dish matching
/// "green curry" lands on Thai before Indian.
pub const DEFAULT_CUISINES: &[CuisineKeywords<'static>] = &[
    CuisineKeywords {
        label: "Italian",
        keywords: &[
            "pizza", "pasta", "spaghetti", "lasagna", "risotto", "gnocchi", "carbonara",
            "ravioli", "tiramisu", "bruschetta", "focaccia", "calzone", "penne",
            "fettuccine", "prosciutto", "gelato", "trattoria", "osteria",
        ],
    },
    CuisineKeywords {
        label: "Japanese",
        keywords: &[
            "sushi", "sashimi", "ramen", "udon", "soba", "tempura", "teriyaki", "katsu",
            "gyoza", "onigiri", "miso", "yakitori", "donburi", "izakaya", "matcha",
        ],
    },
    CuisineKeywords {
        label: "Chinese",
        keywords: &[
            "dumpling", "dim sum", "fried rice", "chow mein", "lo mein", "kung pao",
            "mapo tofu", "peking duck", "wonton", "bao", "char siu", "szechuan", "sichuan",
            "hot pot",
        ],
    },
    CuisineKeywords {
        label: "Mexican",
        keywords: &[
            "taco", "burrito", "quesadilla", "enchilada", "nachos", "tamale", "guacamole",
            "salsa", "churro", "fajita", "carnitas", "al pastor", "taqueria", "elote",
            "pozole",
        ],
    },
    CuisineKeywords {
        label: "Thai",
        keywords: &[
            "pad thai", "thai", "tom yum", "green curry", "red curry", "massaman", "larb",
            "som tam", "pad see ew", "khao soi",
        ],
    },
    CuisineKeywords {
        label: "Indian",
        keywords: &[
            "curry", "tikka", "masala", "biryani", "naan", "samosa", "dal makhani",
            "paneer", "tandoori", "vindaloo", "korma", "dosa", "chutney", "lassi",
        ],
    },
    CuisineKeywords {
        label: "Korean",
        keywords: &[
            "bibimbap", "bulgogi", "kimchi", "galbi", "tteokbokki", "japchae", "korean bbq",
            "kimbap", "soju", "banchan",
        ],
    },
    CuisineKeywords {
        label: "Vietnamese",
        keywords: &[
            "pho", "banh mi", "bun bo", "spring roll", "vermicelli", "com tam", "goi cuon",
        ],
    },
    CuisineKeywords {
        label: "Mediterranean",
        keywords: &[
            "falafel", "hummus", "shawarma", "gyro", "kebab", "pita", "tzatziki", "baklava",
            "souvlaki", "tabbouleh", "moussaka",
        ],
    },
    CuisineKeywords {
        label: "French",
        keywords: &[
            "croissant", "crepe", "baguette", "ratatouille", "escargot", "bouillabaisse",
            "coq au vin", "quiche", "souffle", "bistro", "brasserie", "macarons",
        ],
    },
    CuisineKeywords {
        label: "American",
        keywords: &[
            "burger", "hot dog", "fries", "bbq", "barbecue", "wings", "mac and cheese",
            "steak", "pancake", "brisket", "diner", "milkshake",
        ],
    },
];

/// Keyword-frequency cuisine detector.
///
/// Every lowercase text (dish names plus the venue name) is checked against
/// every keyword; each substring hit adds one point to that keyword's cuisine.
/// The highest total wins and ties keep the cuisine declared first.
#[derive(Debug, Clone, Copy)]
pub struct CuisineClassifier<'a> {
    table: &'a [CuisineKeywords<'a>],
}

impl Default for CuisineClassifier<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_CUISINES)
    }
}

impl<'a> CuisineClassifier<'a> {
    pub fn new(table: &'a [CuisineKeywords<'a>]) -> Self {
        Self { table }
    }

    /// Per-cuisine point totals in declaration order. Cuisines without a
    /// single hit are left out.
    pub fn score_cuisines<S: AsRef<str>>(
        &self,
        dish_names: &[S],
        venue_name: Option<&str>,
    ) -> Vec<(&'a str, u32)> {
        let texts: Vec<String> = dish_names
            .iter()
            .map(|name| name.as_ref().to_lowercase())
            .chain(venue_name.map(str::to_lowercase))
            .collect();

        self.table
            .iter()
            .filter_map(|cuisine| {
                let points: u32 = texts
                    .iter()
                    .map(|text| {
                        cuisine
                            .keywords
                            .iter()
                            .filter(|keyword| text.contains(*keyword))
                            .count() as u32
                    })
                    .sum();

                (points > 0).then_some((cuisine.label, points))
            })
            .collect()
    }

    pub fn classify<S: AsRef<str>>(
        &self,
        dish_names: &[S],
        venue_name: Option<&str>,
    ) -> Option<String> {
        let mut best: Option<(&str, u32)> = None;

        for (label, points) in self.score_cuisines(dish_names, venue_name) {
            match best {
                Some((_, best_points)) if points <= best_points => {}
                _ => best = Some((label, points)),
            }
        }

        if let Some((label, points)) = best {
            debug!("Classified cuisine as {} with {} keyword hit(s)", label, points);
        }

        best.map(|(label, _)| label.to_string())
    }
}
