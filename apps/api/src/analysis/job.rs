use serde::{Deserialize, Serialize};

/// The posting every resume is scored against. Built once at startup and
/// shared read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub position: String,
    pub required_education: Vec<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub required_tools: Vec<String>,
    pub preferred_tools: Vec<String>,
    pub responsibilities: Vec<String>,
}

impl JobDescription {
    /// AI & Data Solution Intern.
    pub fn ai_data_intern() -> Self {
        Self {
            position: "AI & Data Solution Intern".to_string(),
            required_education: owned(&[
                "Computer Science",
                "Data Science",
                "Artificial Intelligence",
                "Computer Engineering",
                "Information Technology",
            ]),
            required_skills: owned(&[
                "Python",
                "Machine Learning",
                "Data Analysis",
                "Statistics",
                "Problem Solving",
            ]),
            preferred_skills: owned(&[
                "Deep Learning",
                "Natural Language Processing",
                "Computer Vision",
                "Big Data",
                "Cloud Computing",
            ]),
            required_tools: owned(&["Python", "Pandas", "NumPy", "Jupyter Notebook", "Git"]),
            preferred_tools: owned(&["TensorFlow", "PyTorch", "Scikit-learn", "Docker", "SQL"]),
            responsibilities: owned(&[
                "Develop and implement AI/ML models",
                "Analyze and process large datasets",
                "Create data visualizations and reports",
                "Collaborate with development team",
                "Research new AI technologies",
            ]),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
