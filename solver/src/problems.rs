// Problem catalogue of the contest service.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub name: &'static str,
    pub size: usize,
}

const PROBLEMS: &[Problem] = &[
    Problem { name: "probatio", size: 3 },
    Problem { name: "primus", size: 6 },
    Problem { name: "secundus", size: 12 },
    Problem { name: "tertius", size: 18 },
    Problem { name: "quartus", size: 24 },
    Problem { name: "quintus", size: 30 },
];

pub fn get_problem(name: &str) -> Option<&'static Problem> {
    PROBLEMS.iter().find(|p| p.name == name)
}

/// Room count of `name`, if it is a known problem.
pub fn get_problem_size(name: &str) -> Option<usize> {
    get_problem(name).map(|p| p.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sizes() {
        assert_eq!(get_problem_size("probatio"), Some(3));
        assert_eq!(get_problem_size("quintus"), Some(30));
        assert_eq!(get_problem_size("aleph"), None);
        assert!(PROBLEMS.windows(2).all(|w| w[0].size < w[1].size));
    }
}
