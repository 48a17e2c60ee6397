use crate::engagement::{Category, Engagement};

/// Các vai trò chạy lần lượt trong hiệu ứng typewriter ở phần hero.
pub const TYPEWRITER_ROLES: [&str; 5] = [
    "BI Developer",
    "Data Engineer",
    "Business Analyst",
    "Fintech Specialist",
    "SAAS Expert",
];

/// Bảng kinh nghiệm làm việc hiển thị trên biểu đồ Gantt, mới nhất trước.
pub fn portfolio_engagements() -> Vec<Engagement> {
    vec![
        engagement(
            "finera.",
            "Data Engineer | BI Developer",
            "2025-04-01",
            "2026-12-31",
            &["Tableau", "Python", "PostgreSQL", "Airbyte", "dbt", "Kestra", "AWS"],
        ),
        engagement(
            "Viscadia",
            "Associate",
            "2023-07-01",
            "2024-10-31",
            &["Excel VBA", "Financial Modeling", "Python", "Sales Analytics"],
        ),
        engagement(
            "Evalueserve",
            "Analyst",
            "2022-06-01",
            "2023-06-30",
            &["Market Research", "M&A Analysis", "Patent Analytics", "PESTLE"],
        ),
        engagement(
            "Dr. Reddy's Laboratories",
            "GMO Intern",
            "2021-08-01",
            "2022-01-31",
            &["Data Analysis", "TPM", "Root Cause Analysis", "Benchmarking"],
        ),
    ]
}

fn engagement(name: &str, role: &str, start: &str, end: &str, skills: &[&str]) -> Engagement {
    Engagement {
        name: name.to_string(),
        role: role.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        category: Category::Work,
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
    }
}
