//! Static technology question bank with alias-tolerant lookup.
//!
//! Pools are ordered by declaration and stable across calls, so sampling the
//! first N is reproducible. Unknown technologies return an empty pool and
//! the caller falls back to generation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical question pools, keyed by lower-case technology name.
static QUESTION_POOLS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut pools: HashMap<&'static str, &'static [&'static str]> = HashMap::new();

    pools.insert(
        "python",
        &[
            "Explain the difference between a list and a tuple in Python. When would you use each?",
            "What is a decorator in Python? Can you give an example of how you would use one?",
            "Explain the Global Interpreter Lock (GIL). How does it affect multi-threading?",
            "What are Python generators? How do they differ from regular functions?",
            "Explain list comprehensions vs generator expressions. When would you prefer one over the other?",
            "How does Python's import system work? What's the difference between import and from-import?",
        ][..],
    );
    pools.insert(
        "javascript",
        &[
            "Explain the difference between var, let, and const. What are their scoping rules?",
            "What is the event loop in JavaScript? How does it handle asynchronous operations?",
            "Explain closures in JavaScript. Can you give a practical example?",
            "Explain promises and async/await. How do they differ from callbacks?",
            "Explain the 'this' keyword. How does its value get determined?",
            "Explain JavaScript's prototypal inheritance. How does it differ from classical inheritance?",
        ][..],
    );
    pools.insert(
        "typescript",
        &[
            "What does TypeScript's structural typing mean in practice?",
            "Explain generics in TypeScript. How do constraints work?",
            "What are union and intersection types? Give an example of each.",
            "How does type narrowing work? Which constructs narrow a type?",
            "What is the difference between interface and type alias declarations?",
        ][..],
    );
    pools.insert(
        "react",
        &[
            "Explain the difference between functional and class components. When would you use each?",
            "What are React hooks? Explain useState and useEffect with examples.",
            "How does React's virtual DOM work? Why is it faster than direct DOM manipulation?",
            "What is state management in React? When would you use Redux vs Context API?",
            "What are controlled vs uncontrolled components? Give examples of each.",
            "Explain React's key prop. Why is it important and what happens if you don't use it?",
        ][..],
    );
    pools.insert(
        "node.js",
        &[
            "Explain Node.js's event-driven, non-blocking I/O model. How does it handle concurrency?",
            "Explain Node.js streams. When would you use readable, writable, or transform streams?",
            "What is the Node.js event loop? Explain the different phases.",
            "What are middleware in Express.js? How do they work?",
            "Explain Node.js clustering. How would you scale a Node.js application?",
        ][..],
    );
    pools.insert(
        "java",
        &[
            "Explain the difference between abstract classes and interfaces. When would you use each?",
            "What is the difference between == and equals() in Java?",
            "Explain Java's garbage collection. How does it work?",
            "What are Java generics? How do they provide type safety?",
            "What's the difference between checked and unchecked exceptions?",
        ][..],
    );
    pools.insert(
        "go",
        &[
            "Explain goroutines and channels. How do they differ from OS threads?",
            "What does 'share memory by communicating' mean in Go?",
            "How does Go handle errors? Compare with exception-based languages.",
            "Explain Go interfaces and implicit satisfaction. Why is that useful?",
            "What are common pitfalls with slices and their backing arrays?",
        ][..],
    );
    pools.insert(
        "rust",
        &[
            "Explain ownership and borrowing. What problems do they solve?",
            "What is the difference between String and &str?",
            "How do lifetimes work? When do you need to annotate them explicitly?",
            "Compare Rc, Arc, and Box. When is each appropriate?",
            "Explain how Result and the ? operator shape error handling in Rust.",
        ][..],
    );
    pools.insert(
        "postgresql",
        &[
            "Explain PostgreSQL's ACID properties. How does it ensure data integrity?",
            "What are PostgreSQL indexes? Explain B-tree, Hash, and GIN indexes.",
            "How do you optimize slow queries in PostgreSQL? What tools do you use?",
            "Explain transactions and isolation levels. When would you use each level?",
            "Explain the JSON and JSONB data types. When would you use each?",
        ][..],
    );
    pools.insert(
        "mongodb",
        &[
            "Explain the difference between SQL and NoSQL databases. When would you choose MongoDB?",
            "What are MongoDB indexes? How do you create and use them effectively?",
            "Explain MongoDB's aggregation pipeline. Give an example of a complex aggregation.",
            "How do you handle relationships in MongoDB? Compare embedded vs referenced documents.",
            "Explain MongoDB's replica sets. How do they provide high availability?",
        ][..],
    );
    pools.insert(
        "docker",
        &[
            "Explain the difference between Docker images and containers. How do they relate?",
            "What is a Dockerfile? Explain key instructions like FROM, RUN, COPY, and CMD.",
            "How do you optimize Docker images? What are multi-stage builds?",
            "Explain Docker volumes. When would you use named volumes vs bind mounts?",
            "What is the difference between CMD and ENTRYPOINT in a Dockerfile?",
            "Explain Docker's layer caching. How does it affect build times?",
        ][..],
    );
    pools.insert(
        "kubernetes",
        &[
            "Explain Kubernetes pods, services, and deployments. How do they work together?",
            "How do you handle configuration in Kubernetes? Explain ConfigMaps and Secrets.",
            "Explain Kubernetes scaling. How do you configure horizontal pod autoscaling?",
            "Explain resource limits and requests. Why are they important?",
            "How do you handle rolling updates in Kubernetes?",
        ][..],
    );
    pools.insert(
        "aws",
        &[
            "Explain the difference between EC2, Lambda, and ECS. When would you use each?",
            "What is AWS S3? Explain different storage classes and when to use them.",
            "How do you secure AWS resources? Explain IAM roles and policies.",
            "What is AWS VPC? Explain subnets, route tables, and security groups.",
            "How do you monitor AWS resources? Explain CloudWatch and its key features.",
        ][..],
    );
    pools.insert(
        "django",
        &[
            "Explain the Django MVT architecture. How does it differ from MVC?",
            "What are Django migrations? How do you create and apply them?",
            "Explain Django's ORM. How would you optimize a slow query?",
            "What is Django middleware? Can you give an example of custom middleware?",
            "What is Django REST Framework? How would you create a RESTful API endpoint?",
        ][..],
    );

    pools
});

/// Aliases for common technology shorthands, keyed lower-case.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("js", "javascript"),
        ("ts", "typescript"),
        ("py", "python"),
        ("python3", "python"),
        ("golang", "go"),
        ("node", "node.js"),
        ("nodejs", "node.js"),
        ("reactjs", "react"),
        ("react.js", "react"),
        ("k8s", "kubernetes"),
        ("postgres", "postgresql"),
        ("mongo", "mongodb"),
    ])
});

/// Resolves a technology token to its canonical bank name, if known.
///
/// Matching is case-insensitive and tolerant of the fixed alias table.
pub fn canonical_name(tech: &str) -> Option<&'static str> {
    let lowered = tech.trim().to_lowercase();
    if let Some((key, _)) = QUESTION_POOLS.get_key_value(lowered.as_str()) {
        return Some(key);
    }
    ALIASES.get(lowered.as_str()).copied()
}

/// Returns the question pool for a technology, empty for unknown ones.
///
/// Order is declaration order and stable across calls.
pub fn lookup(tech: &str) -> &'static [&'static str] {
    match canonical_name(tech) {
        Some(name) => QUESTION_POOLS.get(name).copied().unwrap_or(&[]),
        None => &[],
    }
}

/// Fixed technology-agnostic questions for technologies outside the bank.
///
/// Used when generation is unavailable (degraded mode) or to pad a short
/// question set up to the configured minimum.
pub fn generic_questions(tech: &str) -> Vec<String> {
    vec![
        format!("Can you explain your experience with {}?", tech),
        format!(
            "What are the key features of {} that you find most useful?",
            tech
        ),
        format!(
            "Describe a project where you used {}. What challenges did you face?",
            tech
        ),
        format!("What best practices do you follow when working with {}?", tech),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(!lookup("Python").is_empty());
        assert!(!lookup("PYTHON").is_empty());
        assert_eq!(lookup("Python"), lookup("python"));
    }

    #[test]
    fn lookup_resolves_aliases() {
        assert_eq!(lookup("js"), lookup("javascript"));
        assert_eq!(lookup("k8s"), lookup("kubernetes"));
        assert_eq!(lookup("postgres"), lookup("postgresql"));
    }

    #[test]
    fn lookup_unknown_returns_empty_pool() {
        assert!(lookup("cobol-2000").is_empty());
        assert!(lookup("").is_empty());
    }

    #[test]
    fn lookup_is_stable_across_calls() {
        assert_eq!(lookup("docker"), lookup("docker"));
    }

    #[test]
    fn canonical_name_maps_alias_to_bank_key() {
        assert_eq!(canonical_name("Node"), Some("node.js"));
        assert_eq!(canonical_name("unknown-tech"), None);
    }

    #[test]
    fn every_pool_has_questions() {
        for tech in [
            "python",
            "javascript",
            "typescript",
            "react",
            "node.js",
            "java",
            "go",
            "rust",
            "postgresql",
            "mongodb",
            "docker",
            "kubernetes",
            "aws",
            "django",
        ] {
            assert!(lookup(tech).len() >= 4, "thin pool for {}", tech);
        }
    }

    #[test]
    fn generic_questions_mention_the_technology() {
        let questions = generic_questions("fortran");
        assert!(!questions.is_empty());
        for q in questions {
            assert!(q.contains("fortran"));
        }
    }
}
