use crate::models::{BankEntry, Level, Tier};

/// Static bank tables. Built at compile time and never mutated.
pub struct QuestionBank;

/// Questions of one skill, grouped by tier.
#[derive(Debug, Clone, Copy)]
pub struct SkillBank {
    pub easy: &'static [BankEntry],
    pub intermediate: &'static [BankEntry],
    pub advanced: &'static [BankEntry],
}

impl SkillBank {
    pub fn tier(&self, tier: Tier) -> &'static [BankEntry] {
        match tier {
            Tier::Easy => self.easy,
            Tier::Intermediate => self.intermediate,
            Tier::Advanced => self.advanced,
            Tier::Unknown => &[],
        }
    }
}

const fn entry(
    question: &'static str,
    options: [&'static str; 4],
    answer_index: usize,
    explanation: &'static str,
) -> BankEntry {
    BankEntry {
        question,
        options,
        answer_index,
        explanation,
    }
}

static PYTHON: SkillBank = SkillBank {
    easy: &[
        entry("Which keyword defines a function?", ["func", "def", "define", "lambda"], 1, "Use 'def' to define."),
        entry("What is len([1,2,3])?", ["2", "3", "1", "Error"], 1, "List has 3 items."),
        entry("How to write a comment?", ["# text", "// text", "/* */", "' text"], 0, "# is correct."),
    ],
    intermediate: &[
        entry("What does *args allow?", ["Keywords", "Var positional", "Async", "Typing"], 1, "*args = variable positional."),
        entry("What does enumerate() do?", ["Counts", "Index+item", "Sorts", "Maps"], 1, "Provides index + item."),
    ],
    advanced: &[
        entry("Dict lookup complexity?", ["O(n)", "O(logn)", "O(1)", "O(nlogn)"], 2, "Hash table lookup = O(1)."),
        entry("What is a closure?", ["Fn with retained scope", "Class", "Decorator", "Loop"], 0, "Inner fn retains scope."),
    ],
};

static SQL: SkillBank = SkillBank {
    easy: &[entry("What does SELECT do?", ["Retrieve", "Delete", "Update", "Drop"], 0, "SELECT retrieves.")],
    intermediate: &[entry("GROUP BY groups?", ["Rows", "Columns", "NULLs", "Tables"], 0, "Groups rows.")],
    advanced: &[entry(
        "Correlated subquery?",
        ["Independent", "Depends on outer", "Debug only", "Index"],
        1,
        "Depends on outer query.",
    )],
};

static SKILLS: &[(&str, &SkillBank)] = &[("python", &PYTHON), ("sql", &SQL), ("default", &PYTHON)];

impl QuestionBank {
    /// Bank for `skill` (case-insensitive), or the `default` bank.
    pub fn for_skill(skill: &str) -> &'static SkillBank {
        Self::lookup(skill).unwrap_or(&PYTHON)
    }

    pub fn lookup(skill: &str) -> Option<&'static SkillBank> {
        let key = skill.trim().to_lowercase();
        SKILLS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, bank)| *bank)
    }

    pub fn skills() -> impl Iterator<Item = &'static str> {
        SKILLS.iter().map(|(name, _)| *name).filter(|name| *name != "default")
    }
}

pub static ROLE_SKILLS: &[(&str, &[&str])] = &[
    ("Python Developer", &["python", "django", "rest", "sql", "git", "api", "oop", "pytest"]),
    (
        "Data Scientist",
        &["python", "machine learning", "sql", "statistics", "pandas", "numpy", "nlp", "deep learning"],
    ),
    ("Web Developer", &["html", "css", "javascript", "react", "node", "git", "api", "sql"]),
    ("DevOps Engineer", &["docker", "kubernetes", "cloud", "git", "ci/cd", "terraform", "linux"]),
    ("ML Engineer", &["python", "deep learning", "mlops", "pytorch", "tensorflow", "docker", "cloud"]),
];

/// Configured skills of a role; empty for unknown roles.
pub fn role_skills(role: &str) -> &'static [&'static str] {
    ROLE_SKILLS
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, skills)| *skills)
        .unwrap_or(&[])
}

pub fn roles() -> impl Iterator<Item = &'static str> {
    ROLE_SKILLS.iter().map(|(name, _)| *name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultySettings {
    pub depth: u8,
    pub complexity: u8,
    pub time_limit_seconds: u64,
}

impl DifficultySettings {
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Beginner => Self { depth: 1, complexity: 1, time_limit_seconds: 60 },
            Level::Intermediate => Self { depth: 2, complexity: 2, time_limit_seconds: 90 },
            Level::Advanced => Self { depth: 3, complexity: 3, time_limit_seconds: 120 },
        }
    }
}

pub static SKILL_KEYWORDS: &[&str] = &[
    "python", "java", "sql", "statistics", "pandas", "numpy", "scikit-learn", "matplotlib", "seaborn",
    "machine learning", "deep learning", "nlp", "computer vision", "pytorch", "tensorflow",
    "django", "flask", "fastapi", "rest", "api", "oop", "pytest",
    "html", "css", "javascript", "react", "node", "express", "angular", "vue",
    "docker", "kubernetes", "git", "github", "gitlab", "ci/cd", "terraform", "linux", "cloud", "aws", "gcp", "azure",
    "communication", "teamwork", "leadership", "problem solving", "agile", "scrum",
];
