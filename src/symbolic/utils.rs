
// the collection of utility functions mainly for bracket parsing and proceeding

/// Position of the first bracket without a partner: either a `)` that closes
/// nothing or the innermost `(` that is never closed.
pub fn find_unbalanced_bracket(s: &str) -> Option<usize> {
    let mut stack = Vec::new();
    for (i, c) in s.chars().enumerate() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    stack.pop()
}

pub fn has_balanced_brackets(s: &str) -> bool {
    find_unbalanced_bracket(s).is_none()
}

/// remove every whitespace character, used before textual pattern matching
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        assert!(has_balanced_brackets("(x+1)(x-1)"));
        assert!(has_balanced_brackets("sin(cos(x))"));
        assert!(has_balanced_brackets("x"));
    }

    #[test]
    fn test_unbalanced_positions() {
        // closing bracket without opening one
        assert_eq!(find_unbalanced_bracket("x)+1"), Some(1));
        // unclosed bracket
        assert_eq!(find_unbalanced_bracket("(x+(1"), Some(3));
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" x ^ 3 \t"), "x^3");
    }
}
