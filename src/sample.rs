//! Built-in resume and job description used by the `sample` command

pub const SAMPLE_RESUME: &str = "\
MARIA GARCIA
Backend Engineer
maria.garcia@example.com • (555) 214-9087

SUMMARY
Backend engineer focused on reliable data services.

EXPERIENCE
Senior Backend Engineer | Northwind Logistics | 2021 - present
• Led the redesign of the shipment tracking platform using Python and PostgreSQL
• Migrated 40 services to Docker and Kubernetes, cutting deploy time by 60%
• Mentored 4 engineers and introduced code review guidelines

Software Engineer | Brightline Analytics | 2017 - 2021
• Built REST API endpoints in Django serving 2 million requests per day
• Automated CI/CD pipelines with Jenkins and GitHub
• Reduced cloud spend on AWS by 25%

EDUCATION
Bachelor of Science in Computer Science
State University | 2013 - 2017

SKILLS
• Languages: Python, Go, SQL
• Frameworks: Django, Flask, FastAPI
• Infrastructure: Docker, Kubernetes, Terraform, AWS
• Soft skills: Leadership, Communication, Mentoring

PROJECTS
Open-source task queue
• Designed a Redis-backed job scheduler used by 3 internal teams
";

pub const SAMPLE_JOB_DESCRIPTION: &str = "\
Senior Backend Engineer

We are looking for an experienced engineer to grow our logistics platform.

Requirements:
• 5+ years of experience in backend development
• Strong proficiency in Python and SQL
• Experience with Docker, Kubernetes and AWS
• Knowledge of PostgreSQL and Redis
• Familiarity with CI/CD and Terraform
• Strong communication and leadership skills
• Bachelor's degree in Computer Science or related field

Responsibilities:
• Design and operate scalable services
• Mentor engineers and lead technical projects
";
