use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Sports,    // SP
    Creative,  // CR
    Music,     // MU
    Social,    // SO
    Education, // ED
    Outdoor,   // OU
}

impl Category {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &str {
        match self {
            Category::Sports => "sports",
            Category::Creative => "creative",
            Category::Music => "music",
            Category::Social => "social",
            Category::Education => "education",
            Category::Outdoor => "outdoor",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "sports" => Some(Category::Sports),
            "creative" => Some(Category::Creative),
            "music" => Some(Category::Music),
            "social" => Some(Category::Social),
            "education" => Some(Category::Education),
            "outdoor" => Some(Category::Outdoor),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (full word or two-letter code, any case)
    pub fn from_code(code: &str) -> Option<Self> {
        let up = code.to_uppercase();
        match up.as_str() {
            "SP" => Some(Category::Sports),
            "CR" => Some(Category::Creative),
            "MU" => Some(Category::Music),
            "SO" => Some(Category::Social),
            "ED" => Some(Category::Education),
            "OU" => Some(Category::Outdoor),
            _ => Category::from_db_str(&code.to_lowercase()),
        }
    }
}
