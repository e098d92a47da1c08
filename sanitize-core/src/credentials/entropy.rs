/// Password entropy estimation
///
/// The estimate is `length * log2(base)`, where `base` is the size of every
/// character pool the password draws from and `length` discounts repeated
/// characters and keyboard or alphabet runs.

const REPLACE_CHARS: &str = "!@$&*";
const SEPARATOR_CHARS: &str = "_-., ";
const OTHER_SPECIAL_CHARS: &str = "\"#%'()+/:;<=>?[\\]^{|}~";
const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGIT_CHARS: &str = "0123456789";

const POOLS: [&str; 6] = [
    REPLACE_CHARS,
    SEPARATOR_CHARS,
    OTHER_SPECIAL_CHARS,
    LOWER_CHARS,
    UPPER_CHARS,
    DIGIT_CHARS,
];

const SEQUENCES: [&str; 5] = [
    "0123456789",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "abcdefghijklmnopqrstuvwxyz",
];

/// Longest run of identical characters, or of a sequence, that still counts.
const MAX_RUN: usize = 2;

/// Estimated entropy of `password` in bits.
pub fn estimate_entropy(password: &str) -> f64 {
    let base = character_base(password);
    let length = effective_length(password);
    if base == 0 || length == 0 {
        return 0.0;
    }
    length as f64 * (base as f64).log2()
}

/// Sum of the sizes of all pools touched, plus one for every distinct
/// character outside the pools.
fn character_base(password: &str) -> usize {
    let mut distinct: Vec<char> = password.chars().collect();
    distinct.sort_unstable();
    distinct.dedup();

    let mut touched = [false; POOLS.len()];
    let mut base = 0;

    for c in distinct {
        match POOLS.iter().position(|pool| pool.contains(c)) {
            Some(index) => touched[index] = true,
            None => base += 1,
        }
    }

    for (pool, used) in POOLS.iter().zip(touched) {
        if used {
            base += pool.chars().count();
        }
    }

    base
}

fn effective_length(password: &str) -> usize {
    let mut chars = collapse_repeats(password.chars().collect());
    for sequence in SEQUENCES {
        chars = trim_sequence_runs(chars, sequence);
    }
    chars.len()
}

/// Keep at most `MAX_RUN` consecutive identical characters.
fn collapse_repeats(chars: Vec<char>) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    for c in chars {
        let run = out.iter().rev().take_while(|prev| **prev == c).count();
        if run < MAX_RUN {
            out.push(c);
        }
    }
    out
}

/// Keep only the first `MAX_RUN` characters of every ascending run taken
/// from `sequence`.
fn trim_sequence_runs(chars: Vec<char>, sequence: &str) -> Vec<char> {
    let position = |c: char| sequence.chars().position(|s| s == c);

    let mut out = Vec::with_capacity(chars.len());
    let mut run = 0;
    let mut previous: Option<usize> = None;

    for c in chars {
        let current = position(c);
        run = match (previous, current) {
            (Some(p), Some(q)) if q == p + 1 => run + 1,
            (_, Some(_)) => 1,
            _ => 0,
        };
        previous = current;

        if run <= MAX_RUN {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(estimate_entropy(""), 0.0);
    }

    #[test]
    fn test_base_counts_pools() {
        assert_eq!(character_base("abc"), 26);
        assert_eq!(character_base("aB3"), 62);
        assert_eq!(character_base("a!"), 31);
        assert_eq!(character_base("a-"), 31);
        assert_eq!(character_base("a#"), 48);
        // Characters outside every pool count one each.
        assert_eq!(character_base("aéü"), 28);
    }

    #[test]
    fn test_repeats_are_discounted() {
        assert_eq!(effective_length("aaaaaaaaaa"), 2);
        assert_eq!(effective_length("aabbaa"), 6);
        assert_eq!(effective_length("abbbbbc"), 4);
        assert!(approx(estimate_entropy("aaaaaaaaaa"), 2.0 * 26f64.log2()));
    }

    #[test]
    fn test_sequences_are_discounted() {
        assert_eq!(effective_length("123456789"), 2);
        assert_eq!(effective_length("qwertyuiop"), 2);
        assert_eq!(effective_length("abcdef"), 2);
        assert_eq!(effective_length("password123"), 10);
        // Descending runs are not sequences.
        assert_eq!(effective_length("987"), 3);
    }

    #[test]
    fn test_diverse_passphrase_scores_high() {
        assert!(estimate_entropy("Tr0ub4dor&3-horse-Staple") > 100.0);
        assert!(estimate_entropy("password123") < 60.0);
    }
}
