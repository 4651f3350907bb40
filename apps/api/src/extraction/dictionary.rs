/// Default canonical skill dictionary, in extraction order.
pub const DEFAULT_SKILLS: &[&str] = &[
    "c++",
    "python",
    "java",
    "javascript",
    "sql",
    "html",
    "css",
    "react",
    "node.js",
    "mongodb",
    "mysql",
    "postgresql",
    "git",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "deep learning",
    "nlp",
    "pandas",
    "numpy",
    "excel",
    "power bi",
    "tableau",
    "data analysis",
    "data cleaning",
    "statistics",
    "tensorflow",
    "pytorch",
    "rest api",
    "rest apis",
    "spring",
    "spring boot",
    "django",
    "flask",
    "angular",
    "vue.js",
    "system design",
    "mlops",
    "keras",
    "computer vision",
    "stakeholder management",
    "user stories",
    "product roadmap",
    "agile",
    "scrum",
    "reporting",
    "bi",
    "etl",
    "data warehouse",
    "leadership",
    "communication",
    "problem solving",
    "teamwork",
];
