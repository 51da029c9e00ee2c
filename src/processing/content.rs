//! Preparation content: round checklist, 7-day plan and interview questions
//!
//! Each generator starts from a fixed skeleton and appends skill-specific
//! material. Output depends only on the detected skills.

use crate::schema::{ChecklistRound, PlanDay, SkillCategories, MAX_QUESTIONS};

/// Generic questions are added when fewer skill-specific ones than this were found.
const MIN_SKILL_QUESTIONS: usize = 6;

const CORE_QUESTIONS: &[&str] = &[
    "Explain the difference between stack and heap memory.",
    "What is time complexity? Analyze the complexity of binary search.",
    "Explain inheritance and polymorphism with examples.",
];

const GENERIC_QUESTIONS: &[&str] = &[
    "Tell me about yourself and your technical background.",
    "Explain a challenging project you worked on.",
    "How do you keep up with new technologies?",
    "Describe your approach to debugging a complex issue.",
    "How do you handle tight deadlines and pressure?",
];

/// Skill triggers and the questions they add, in output order.
const SKILL_QUESTIONS: &[(&[&str], &[&str])] = &[
    (
        &["SQL", "MySQL", "PostgreSQL"],
        &[
            "Explain indexing in databases and when it helps vs hurts performance.",
            "What are the different types of joins in SQL? Give examples.",
            "Explain normalization and denormalization with use cases.",
        ],
    ),
    (
        &["React"],
        &[
            "Explain state management options in React and when to use each.",
            "What is the virtual DOM and how does React use it?",
            "Explain React hooks and custom hooks with examples.",
            "How would you optimize a React application for performance?",
        ],
    ),
    (
        &["JavaScript", "TypeScript"],
        &[
            "Explain closures in JavaScript with a practical example.",
            "What is the event loop and how does it work?",
            "Explain the difference between == and === in JavaScript.",
        ],
    ),
    (
        &["Java"],
        &[
            "Explain the difference between abstract classes and interfaces.",
            "What is the Java Collections Framework? Explain List vs Set vs Map.",
            "Explain multithreading in Java and how to handle synchronization.",
        ],
    ),
    (
        &["Python"],
        &[
            "Explain list comprehensions and generator expressions.",
            "What are decorators in Python and how do they work?",
            "Explain the GIL (Global Interpreter Lock) and its implications.",
        ],
    ),
    (
        &["AWS", "Azure", "GCP"],
        &[
            "Explain the difference between IaaS, PaaS, and SaaS with examples.",
            "How would you design a scalable web application on the cloud?",
            "Explain load balancing and auto-scaling strategies.",
        ],
    ),
    (
        &["Docker", "Kubernetes"],
        &[
            "Explain containerization and its benefits over virtualization.",
            "What is the difference between Docker and Kubernetes?",
            "Explain microservices architecture and its pros/cons.",
        ],
    ),
    (
        &["DSA", "Data Structures"],
        &[
            "How would you optimize search in sorted data?",
            "Explain dynamic programming with a real-world example.",
            "Compare different sorting algorithms and their use cases.",
        ],
    ),
    (
        &["REST", "GraphQL"],
        &[
            "Explain RESTful API design principles.",
            "What is the difference between REST and GraphQL?",
            "How would you version your APIs?",
        ],
    ),
    (
        &["MongoDB", "Redis"],
        &[
            "Explain NoSQL databases and when to use them over SQL.",
            "What is eventual consistency in distributed databases?",
        ],
    ),
];

fn has_any(skills: &SkillCategories, candidates: &[&str]) -> bool {
    candidates.iter().any(|s| skills.has_skill(s))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn push_all(target: &mut Vec<String>, items: &[&str]) {
    target.extend(items.iter().map(|s| s.to_string()));
}

/// Four interview rounds of preparation items.
pub fn generate_checklist(skills: &SkillCategories) -> Vec<ChecklistRound> {
    let mut checklist = vec![
        ChecklistRound {
            round_title: "Round 1: Aptitude / Basics".to_string(),
            items: strings(&[
                "Practice quantitative aptitude (percentage, profit/loss, ratios)",
                "Review logical reasoning and pattern recognition",
                "Solve 10+ verbal ability questions",
                "Brush up on basic mathematics",
                "Take a timed mock aptitude test",
            ]),
        },
        ChecklistRound {
            round_title: "Round 2: DSA + Core CS".to_string(),
            items: strings(&[
                "Review arrays, strings, and basic data structures",
                "Practice 5+ problems on searching and sorting",
                "Study time and space complexity analysis",
                "Revise OOP concepts: inheritance, polymorphism, encapsulation",
                "Understand DBMS basics: normalization, joins, indexing",
                "Review OS concepts: processes, threads, memory management",
                "Solve 3+ medium difficulty coding problems",
            ]),
        },
        ChecklistRound {
            round_title: "Round 3: Technical Interview".to_string(),
            items: strings(&[
                "Prepare project explanation (problem, solution, impact)",
                "Review your strongest programming language in depth",
                "Study system design basics: scalability, load balancing",
                "Practice explaining your code clearly",
                "Prepare answers for \"Tell me about yourself\"",
                "Review company-specific technologies if any",
            ]),
        },
        ChecklistRound {
            round_title: "Round 4: Managerial / HR".to_string(),
            items: strings(&[
                "Prepare STAR format answers for behavioral questions",
                "Research company culture and values",
                "Practice \"Why this company?\" response",
                "Prepare questions to ask the interviewer",
                "Review your resume thoroughly",
                "Practice salary negotiation basics",
            ]),
        },
    ];

    if has_any(skills, &["React", "Angular", "Vue"]) {
        push_all(
            &mut checklist[2].items,
            &[
                "Review frontend framework concepts and lifecycle methods",
                "Practice explaining virtual DOM and state management",
            ],
        );
    }

    if has_any(skills, &["SQL", "MySQL", "PostgreSQL"]) {
        push_all(&mut checklist[1].items, &["Practice SQL queries: joins, subqueries, aggregations"]);
        push_all(&mut checklist[2].items, &["Prepare to explain database design decisions"]);
    }

    if has_any(skills, &["AWS", "Azure", "GCP"]) {
        push_all(
            &mut checklist[2].items,
            &[
                "Review cloud services: EC2, S3, Lambda basics",
                "Understand cloud deployment and CI/CD pipelines",
            ],
        );
    }

    if has_any(skills, &["Docker", "Kubernetes"]) {
        push_all(
            &mut checklist[2].items,
            &[
                "Explain containerization benefits and Docker basics",
                "Understand Kubernetes orchestration concepts",
            ],
        );
    }

    checklist
}

fn day(number: u8, focus: &str, tasks: &[&str]) -> PlanDay {
    PlanDay {
        day: format!("Day {}", number),
        focus: focus.to_string(),
        tasks: strings(tasks),
    }
}

pub fn generate_seven_day_plan(skills: &SkillCategories) -> Vec<PlanDay> {
    let mut plan = vec![
        day(1, "Basics + Core CS", &[
            "Review data structures: arrays, linked lists, stacks, queues",
            "Study OOP principles with examples",
            "Practice 3 easy coding problems",
        ]),
        day(2, "Core CS Continued", &[
            "Review DBMS: normalization, SQL basics, joins",
            "Study OS: processes, threads, scheduling",
            "Practice 2 medium coding problems",
        ]),
        day(3, "DSA + Coding Practice", &[
            "Focus on searching and sorting algorithms",
            "Practice binary search variations",
            "Solve 5 mixed difficulty problems",
        ]),
        day(4, "Advanced DSA", &[
            "Study trees, graphs, and dynamic programming basics",
            "Practice recursion and backtracking",
            "Solve 4 medium-hard problems",
        ]),
        day(5, "Project + Resume Alignment", &[
            "Document project details: tech stack, challenges, outcomes",
            "Align resume with JD keywords",
            "Prepare project demo/explanation",
        ]),
        day(6, "Mock Interview Questions", &[
            "Practice technical questions from generated list",
            "Do a mock coding interview with timer",
            "Practice behavioral questions using STAR method",
        ]),
        day(7, "Revision + Weak Areas", &[
            "Review all notes and key concepts",
            "Focus on identified weak areas",
            "Light practice: 2-3 problems for confidence",
            "Rest and prepare mentally for interview",
        ]),
    ];

    if skills.has_skill("React") {
        push_all(
            &mut plan[4].tasks,
            &[
                "Review React hooks, context API, and state management",
                "Practice explaining component lifecycle and optimization",
            ],
        );
    }

    if has_any(skills, &["Node.js", "Express"]) {
        push_all(
            &mut plan[4].tasks,
            &[
                "Review backend architecture and API design principles",
                "Practice explaining middleware and authentication",
            ],
        );
    }

    if skills.has_skill("SQL") {
        push_all(&mut plan[1].tasks, &["Practice complex SQL queries and optimization"]);
        push_all(&mut plan[5].tasks, &["Prepare to explain indexing and query optimization"]);
    }

    if has_any(skills, &["AWS", "Docker"]) {
        push_all(&mut plan[4].tasks, &["Review cloud deployment and DevOps concepts"]);
        push_all(&mut plan[5].tasks, &["Practice explaining system architecture diagrams"]);
    }

    plan
}

/// Up to ten questions: core, then skill-specific, then generic filler.
pub fn generate_questions(skills: &SkillCategories) -> Vec<String> {
    let mut questions = strings(CORE_QUESTIONS);

    let mut skill_specific = 0;
    for (triggers, extra) in SKILL_QUESTIONS {
        if has_any(skills, triggers) {
            push_all(&mut questions, extra);
            skill_specific += extra.len();
        }
    }

    if skill_specific < MIN_SKILL_QUESTIONS {
        push_all(&mut questions, GENERIC_QUESTIONS);
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(web: &[&str], data: &[&str], cloud: &[&str]) -> SkillCategories {
        SkillCategories {
            web: strings(web),
            data: strings(data),
            cloud: strings(cloud),
            ..Default::default()
        }
    }

    #[test]
    fn test_checklist_skeleton() {
        let checklist = generate_checklist(&SkillCategories::default());
        assert_eq!(checklist.len(), 4);
        assert_eq!(checklist[1].items.len(), 7);
        assert_eq!(checklist[2].items.len(), 6);
    }

    #[test]
    fn test_checklist_extensions() {
        let checklist = generate_checklist(&with(&["React"], &["SQL"], &["Docker"]));
        assert_eq!(checklist[1].items.last().unwrap(), "Practice SQL queries: joins, subqueries, aggregations");
        // 6 base + 2 frontend + 1 database + 2 container
        assert_eq!(checklist[2].items.len(), 11);
    }

    #[test]
    fn test_plan_skeleton_and_extensions() {
        let base = generate_seven_day_plan(&SkillCategories::default());
        assert_eq!(base.len(), 7);
        assert_eq!(base[6].tasks.len(), 4);

        let tuned = generate_seven_day_plan(&with(&["React", "Node.js"], &["SQL"], &["AWS"]));
        assert_eq!(tuned[4].tasks.len(), 3 + 2 + 2 + 1);
        assert_eq!(tuned[1].tasks.len(), 4);
        assert_eq!(tuned[5].tasks.len(), 5);
    }

    #[test]
    fn test_questions_without_skills_use_generic_filler() {
        let questions = generate_questions(&SkillCategories::default());
        assert_eq!(questions.len(), 8);
        assert_eq!(questions[3], GENERIC_QUESTIONS[0]);
    }

    #[test]
    fn test_few_skill_questions_still_get_filler_then_truncate() {
        let questions = generate_questions(&with(&[], &["SQL"], &[]));
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[5], "Explain normalization and denormalization with use cases.");
        assert_eq!(questions[6], GENERIC_QUESTIONS[0]);
    }

    #[test]
    fn test_many_skill_questions_are_truncated_without_filler() {
        let questions = generate_questions(&with(&["React"], &["SQL"], &["AWS"]));
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert!(!questions.iter().any(|q| GENERIC_QUESTIONS.contains(&q.as_str())));
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        let skills = SkillCategories {
            languages: strings(&["JavaScript"]),
            ..Default::default()
        };
        let questions = generate_questions(&skills);
        assert!(questions.iter().any(|q| q.contains("closures")));
        assert!(!questions.iter().any(|q| q.contains("Collections Framework")));
    }

    #[test]
    fn test_generators_are_deterministic() {
        let skills = with(&["React"], &["MongoDB"], &["Kubernetes"]);
        assert_eq!(generate_checklist(&skills), generate_checklist(&skills));
        assert_eq!(generate_seven_day_plan(&skills), generate_seven_day_plan(&skills));
        assert_eq!(generate_questions(&skills), generate_questions(&skills));
    }
}
