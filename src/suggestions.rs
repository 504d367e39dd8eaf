//! Canned content suggestions, chosen by the resume's type.
//!
//! Every suggestion names the field it fills using the paths understood by
//! [`ResumeContent::apply_suggestion`]: `summary`, or `<section id>.<line index>` for a section
//! line.

use serde::Serialize;

use crate::model::ResumeContent;

/// A proposed value for one field of a resume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub field: String,
    pub value: String,
    pub explanation: String,
}

struct Entry {
    field: &'static str,
    value: &'static str,
    explanation: &'static str,
}

struct SuggestionSet {
    resume_type: &'static str,
    entries: &'static [Entry],
}

/// Resume types that have their own suggestion set.
pub fn resume_types() -> impl Iterator<Item = &'static str> {
    SETS.iter().map(|set| set.resume_type)
}

/// Suggestions for `resume_type`, limited to the fields `content` actually has.
///
/// Types are matched case-insensitively; unknown types, including the default `"Personal"`,
/// get a generic fill-in-the-blanks set.
pub fn suggestions(resume_type: &str, content: &ResumeContent) -> Vec<Suggestion> {
    let key = resume_type.trim().to_ascii_lowercase();
    let set = SETS
        .iter()
        .find(|set| set.resume_type == key)
        .unwrap_or(&GENERIC);

    set.entries
        .iter()
        .filter(|entry| content.has_field(entry.field))
        .map(|entry| Suggestion {
            field: entry.field.to_string(),
            value: entry.value.to_string(),
            explanation: entry.explanation.to_string(),
        })
        .collect()
}

/// Display form of a resume type: `"software-engineer"` becomes `"Software Engineer"`.
pub fn resume_type_label(resume_type: &str) -> String {
    resume_type
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

static SETS: &[SuggestionSet] = &[
    SuggestionSet {
        resume_type: "student-resume",
        entries: &[
            Entry {
                field: "summary",
                value: "Ambitious computer science student at XYZ University with a strong foundation in \
                 programming and a passion for innovative technologies. Seeking an internship \
                 opportunity to apply classroom knowledge to real-world projects and gain hands-on \
                 experience in software development. Proven ability to learn quickly and work \
                 effectively in team environments.",
                explanation: "This summary highlights your status as a student while emphasizing your enthusiasm, \
                 readiness for practical experience, and key soft skills.",
            },
            Entry {
                field: "experience.0",
                value: "Software Development Intern | TechStart Inc. | Summer 2023\n\u{2022} Collaborated \
                 with a team of 5 to develop a mobile app for campus event management using React \
                 Native and Firebase\n\u{2022} Implemented user authentication and real-time database \
                 updates, improving app responsiveness by 30%\n\u{2022} Participated in daily \
                 stand-ups and bi-weekly code reviews, enhancing team communication and code quality",
                explanation: "This experience entry provides specific details about your internship, including \
                 technologies used, quantifiable achievements, and demonstration of teamwork.",
            },
            Entry {
                field: "skills.0",
                value: "Technical Skills:\n\u{2022} Programming Languages: Java, Python, JavaScript, \
                 C++\n\u{2022} Web Technologies: HTML5, CSS3, React.js\n\u{2022} Tools & Platforms: \
                 Git, GitHub, Firebase, AWS (basic)\n\u{2022} Databases: MySQL, MongoDB\n\u{2022} Soft \
                 Skills: Problem-solving, Teamwork, Time Management, Adaptability",
                explanation: "This comprehensive list of skills showcases both your technical abilities and \
                 important soft skills, making you a well-rounded candidate for internships or \
                 entry-level positions.",
            },
        ],
    },
    SuggestionSet {
        resume_type: "software-engineer",
        entries: &[
            Entry {
                field: "summary",
                value: "Innovative software engineer with 5+ years of experience in full-stack development, \
                 specializing in scalable web applications and cloud-native solutions. Proven track \
                 record of leading teams to deliver high-performance, user-centric products that drive \
                 business growth. Adept at translating complex requirements into elegant, efficient \
                 code.",
                explanation: "This summary emphasizes your experience level, technical expertise, leadership \
                 skills, and ability to deliver business value through technology.",
            },
            Entry {
                field: "experience.0",
                value: "Senior Software Engineer | InnovateTech Solutions | 2020 - Present\n\u{2022} Led the \
                 redesign and migration of a monolithic e-commerce platform to a microservices \
                 architecture, resulting in a 40% increase in user engagement and a 25% reduction in \
                 infrastructure costs\n\u{2022} Implemented CI/CD pipelines using Jenkins and Docker, \
                 reducing deployment time by 70% and improving overall system reliability\n\u{2022} \
                 Mentored junior developers and conducted bi-weekly knowledge sharing sessions, \
                 fostering a culture of continuous learning and improving team productivity by \
                 20%\n\u{2022} Optimized database queries and implemented caching strategies, leading \
                 to a 50% improvement in application response time",
                explanation: "This detailed experience entry showcases your technical leadership, ability to drive \
                 significant improvements, and quantifiable achievements in a senior role.",
            },
            Entry {
                field: "skills.0",
                value: "Technical Expertise:\n\u{2022} Languages & Frameworks: Java, Python, JavaScript, \
                 TypeScript, React, Node.js, Spring Boot\n\u{2022} Cloud & DevOps: AWS (EC2, S3, \
                 Lambda), Docker, Kubernetes, Jenkins, Terraform\n\u{2022} Databases: PostgreSQL, \
                 MongoDB, Redis\n\u{2022} Tools & Methodologies: Git, Jira, Agile/Scrum, TDD, \
                 Microservices Architecture\n\u{2022} Soft Skills: Team Leadership, Project \
                 Management, Technical Writing, Client Communication",
                explanation: "This comprehensive skill set demonstrates your full-stack capabilities, DevOps \
                 expertise, and the soft skills necessary for senior engineering roles.",
            },
        ],
    },
    SuggestionSet {
        resume_type: "marketing-specialist",
        entries: &[
            Entry {
                field: "summary",
                value: "Results-driven marketing specialist with 6 years of experience in digital marketing \
                 and brand strategy. Proven track record of developing and executing successful \
                 multi-channel campaigns that drive engagement, increase ROI, and enhance brand \
                 visibility. Skilled in data analysis, content creation, and marketing automation \
                 tools.",
                explanation: "This summary highlights your experience, emphasizes your ability to deliver \
                 measurable results, and showcases your diverse skill set in digital marketing.",
            },
            Entry {
                field: "experience.0",
                value: "Senior Marketing Specialist | GlobalBrand Co. | 2020 - Present\n\u{2022} Spearheaded \
                 a comprehensive digital marketing strategy that increased customer acquisition by 35% \
                 and improved brand awareness by 50% within 12 months\n\u{2022} Managed a $500K annual \
                 marketing budget, optimizing spend across channels to achieve a 20% increase in \
                 ROI\n\u{2022} Developed and implemented an influencer marketing program, resulting in \
                 a 75% increase in social media engagement and a 25% boost in website \
                 traffic\n\u{2022} Utilized marketing automation tools to create personalized email \
                 campaigns, improving open rates by 40% and conversion rates by 25%\n\u{2022} \
                 Conducted A/B testing on landing pages and ad creatives, leading to a 30% improvement \
                 in click-through rates",
                explanation: "This experience entry provides specific metrics and achievements, demonstrating your \
                 impact across various aspects of digital marketing.",
            },
            Entry {
                field: "skills.0",
                value: "Marketing Expertise:\n\u{2022} Digital Marketing: SEO, SEM, Content Marketing, Social \
                 Media Marketing, Email Marketing\n\u{2022} Analytics & Tools: Google Analytics, \
                 Google Ads, Facebook Ads Manager, HubSpot, Mailchimp, Hootsuite\n\u{2022} Content \
                 Creation: Adobe Creative Suite, Canva, Video Editing\n\u{2022} Data Analysis: Excel, \
                 PowerBI, SQL (basic)\n\u{2022} Soft Skills: Strategic Planning, Project Management, \
                 Client Relationship Management, Cross-functional Collaboration",
                explanation: "This comprehensive skill set showcases your proficiency in various digital marketing \
                 disciplines, tools, and the soft skills necessary for success in marketing roles.",
            },
        ],
    },
    SuggestionSet {
        resume_type: "data-scientist",
        entries: &[
            Entry {
                field: "summary",
                value: "Innovative data scientist with 4+ years of experience leveraging advanced analytics \
                 and machine learning techniques to drive data-informed business decisions. Proven \
                 expertise in developing predictive models, conducting statistical analyses, and \
                 translating complex data into actionable insights. Adept at collaborating with \
                 cross-functional teams to solve challenging business problems.",
                explanation: "This summary emphasizes your technical expertise, ability to derive business value \
                 from data, and collaborative skills essential for data science roles.",
            },
            Entry {
                field: "experience.0",
                value: "Senior Data Scientist | DataDriven Corp. | 2021 - Present\n\u{2022} Developed and \
                 implemented a machine learning model to predict customer churn, resulting in a 25% \
                 increase in customer retention and $2M annual revenue savings\n\u{2022} Led a team of \
                 3 data scientists in creating a recommendation engine that improved cross-sell \
                 opportunities by 40% and increased average order value by 15%\n\u{2022} Designed and \
                 maintained a real-time dashboard using PowerBI for C-level executives, providing \
                 insights that guided strategic decision-making and resulted in a 10% increase in \
                 operational efficiency\n\u{2022} Collaborated with the marketing team to optimize \
                 campaign targeting using clustering algorithms, leading to a 30% improvement in \
                 campaign ROI\n\u{2022} Implemented NLP techniques to analyze customer feedback, \
                 identifying key areas for product improvement and contributing to a 20% increase in \
                 customer satisfaction scores",
                explanation: "This experience entry showcases your ability to apply data science techniques to \
                 solve real business problems, work with different teams, and deliver quantifiable \
                 results.",
            },
            Entry {
                field: "skills.0",
                value: "Technical Expertise:\n\u{2022} Programming Languages: Python, R, SQL\n\u{2022} \
                 Machine Learning: Scikit-learn, TensorFlow, PyTorch, XGBoost\n\u{2022} Big Data \
                 Technologies: Hadoop, Spark, Hive\n\u{2022} Data Visualization: Tableau, PowerBI, \
                 Matplotlib, Seaborn\n\u{2022} Cloud Platforms: AWS (SageMaker, EMR), Google Cloud \
                 Platform\n\u{2022} Statistical Analysis: Hypothesis Testing, Regression Analysis, \
                 Time Series Analysis\n\u{2022} Soft Skills: Problem-solving, Communication, Project \
                 Management, Team Leadership",
                explanation: "This comprehensive skill set demonstrates your proficiency in core data science \
                 technologies, big data tools, and the soft skills necessary for senior data science \
                 roles.",
            },
        ],
    },
    SuggestionSet {
        resume_type: "ux-designer",
        entries: &[
            Entry {
                field: "summary",
                value: "Creative and user-focused UX designer with 4+ years of experience crafting intuitive \
                 digital experiences for web and mobile platforms. Skilled in user research, \
                 wireframing, prototyping, and usability testing. Passionate about creating accessible \
                 and inclusive designs that delight users and drive business objectives.",
                explanation: "This summary highlights your creative skills, technical expertise, and focus on \
                 user-centered design principles, emphasizing the business impact of good UX.",
            },
            Entry {
                field: "experience.0",
                value: "Senior UX Designer | InnovateUX Agency | 2020 - Present\n\u{2022} Led the redesign of \
                 a major e-commerce platform's checkout process, resulting in a 40% reduction in cart \
                 abandonment and a 25% increase in conversion rates\n\u{2022} Conducted user research \
                 and created personas for a healthcare app, leading to the development of features \
                 that increased user engagement by 60%\n\u{2022} Implemented a design system that \
                 improved design consistency across products and reduced design-to-development time by \
                 30%\n\u{2022} Facilitated design thinking workshops for clients, resulting in \
                 innovative solutions and a 50% increase in client satisfaction scores\n\u{2022} \
                 Mentored junior designers and introduced a peer review process, enhancing team \
                 collaboration and improving overall design quality",
                explanation: "This experience entry demonstrates your ability to lead UX projects, conduct user \
                 research, implement design systems, and quantify the impact of your work on business \
                 metrics.",
            },
            Entry {
                field: "skills.0",
                value: "UX Design Expertise:\n\u{2022} Design Tools: Figma, Sketch, Adobe XD, \
                 InVision\n\u{2022} Prototyping: Axure RP, Principle, Framer\n\u{2022} User Research: \
                 Usability Testing, A/B Testing, Heuristic Evaluation, User Interviews\n\u{2022} \
                 Information Architecture: Site Mapping, User Flows, Card Sorting\n\u{2022} Visual \
                 Design: Typography, Color Theory, Iconography\n\u{2022} Coding (basic): HTML, CSS, \
                 JavaScript\n\u{2022} Soft Skills: Empathy, Communication, Presentation, Team \
                 Collaboration",
                explanation: "This comprehensive skill set showcases your proficiency in UX design tools, \
                 methodologies, and the soft skills necessary for creating user-centered designs and \
                 collaborating effectively with teams.",
            },
        ],
    },
    SuggestionSet {
        resume_type: "project-manager",
        entries: &[
            Entry {
                field: "summary",
                value: "Dynamic project manager with 8+ years of experience leading cross-functional teams in \
                 delivering complex IT and business transformation projects. Adept at risk management, \
                 stakeholder communication, and Agile methodologies. Proven track record of completing \
                 projects on time and within budget while exceeding client expectations.",
                explanation: "This summary emphasizes your extensive experience, leadership skills, and ability to \
                 manage complex projects successfully.",
            },
            Entry {
                field: "experience.0",
                value: "Senior Project Manager | GlobalTech Solutions | 2018 - Present\n\u{2022} Successfully \
                 delivered a $5M enterprise software implementation project for a Fortune 500 client, \
                 completing it 10% under budget and 2 weeks ahead of schedule\n\u{2022} Led a team of \
                 20+ developers, designers, and QA specialists in an Agile environment, improving team \
                 velocity by 30% through process optimizations and effective sprint planning\n\u{2022} \
                 Implemented a risk management framework that reduced project delays by 40% and \
                 improved stakeholder satisfaction scores from 7.5 to 9.2 out of 10\n\u{2022} Managed \
                 the migration of legacy systems to cloud-based solutions for 3 major clients, \
                 resulting in a 25% reduction in operational costs and improved system \
                 reliability\n\u{2022} Developed and maintained project dashboards using PowerBI, \
                 providing real-time insights to stakeholders and improving decision-making efficiency",
                explanation: "This detailed experience entry showcases your ability to manage large-scale projects, \
                 lead teams effectively, implement process improvements, and deliver tangible results \
                 for clients.",
            },
            Entry {
                field: "skills.0",
                value: "Project Management Expertise:\n\u{2022} Methodologies: Agile (Scrum, Kanban), \
                 Waterfall, Hybrid\n\u{2022} Tools: JIRA, Microsoft Project, Trello, Asana, \
                 Confluence\n\u{2022} Certifications: PMP, PRINCE2, Scrum Master\n\u{2022} Technical \
                 Knowledge: Software Development Lifecycle, Cloud Migration, IT \
                 Infrastructure\n\u{2022} Financial Management: Budgeting, Cost Control, ROI \
                 Analysis\n\u{2022} Soft Skills: Leadership, Negotiation, Conflict Resolution, \
                 Strategic Thinking, Stakeholder Management",
                explanation: "This comprehensive skill set demonstrates your proficiency in various project \
                 management methodologies, tools, and the soft skills necessary for successfully \
                 leading complex projects and teams.",
            },
        ],
    },
];

static GENERIC: SuggestionSet = SuggestionSet {
    resume_type: "generic",
    entries: &[
        Entry {
            field: "summary",
            value: "Experienced professional with a proven track record of success in [Your Industry]. \
             Skilled in [Key Skill 1], [Key Skill 2], and [Key Skill 3], with a focus on \
             delivering results and driving innovation. Adept at [Key Strength 1] and [Key \
             Strength 2], consistently exceeding performance targets and contributing to \
             organizational growth.",
            explanation: "This generic summary can be customized to fit your specific industry and key skills.",
        },
        Entry {
            field: "experience.0",
            value: "[Your Job Title] | [Company Name] | [Start Date] - [End Date]\n\u{2022} Spearheaded a \
             major project that resulted in [Specific Achievement], leading to [Positive Outcome] \
             for the company\n\u{2022} Implemented [Strategy or Tool], resulting in [Quantifiable \
             Result] improvement in [Relevant Metric]\n\u{2022} Collaborated with cross-functional \
             teams to [Accomplish Task], which contributed to [Business Impact]\n\u{2022} \
             Recognized for [Achievement or Skill], receiving [Award or Recognition] for \
             outstanding performance",
            explanation: "This experience entry provides a framework for highlighting significant achievements \
             with measurable results, demonstrating your impact in previous roles.",
        },
        Entry {
            field: "skills.0",
            value: "Core Competencies:\n\u{2022} [Skill Category 1]: [Skill 1], [Skill 2], [Skill \
             3]\n\u{2022} [Skill Category 2]: [Skill 4], [Skill 5], [Skill 6]\n\u{2022} [Skill \
             Category 3]: [Skill 7], [Skill 8], [Skill 9]\n\u{2022} Tools & Technologies: [Tool \
             1], [Tool 2], [Tool 3]\n\u{2022} Soft Skills: [Soft Skill 1], [Soft Skill 2], [Soft \
             Skill 3], [Soft Skill 4]",
            explanation: "This skill set template allows you to showcase a comprehensive range of abilities \
             relevant to your field.",
        },
    ],
};
