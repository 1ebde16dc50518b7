//! Wildcard topic matching
//!
//! Compares a subscribed pattern with a published topic, walking both from
//! the left:
//!
//! - `#` matches whatever is left of the topic, including nothing after a
//!   trailing `/` (`a/#` matches `a/` and `a/b/c`, but not `a`).
//! - `+` swallows the topic up to the next `/` or the end.
//! - everything else must match literally.
//!
//! A `/` in the topic where the pattern has neither `/` nor `#` is a
//! mismatch, even if the characters before it agreed.

const SEPARATOR: u8 = b'/';
const SINGLE_LEVEL: u8 = b'+';
const MULTI_LEVEL: u8 = b'#';

pub fn matches(pattern: &str, topic: &str) -> bool {
    let pattern = pattern.as_bytes();
    let topic = topic.as_bytes();
    let (mut p, mut t) = (0, 0);

    while p < pattern.len() && t < topic.len() {
        match pattern[p] {
            MULTI_LEVEL => return true,
            SINGLE_LEVEL => {
                while t < topic.len() && topic[t] != SEPARATOR {
                    t += 1;
                }
                p += 1;
            }
            c if c == topic[t] => {
                p += 1;
                t += 1;
            }
            _ => return false,
        }

        if topic.get(t) == Some(&SEPARATOR)
            && !matches!(pattern.get(p), Some(&SEPARATOR) | Some(&MULTI_LEVEL))
        {
            return false;
        }
    }

    if pattern.get(p) == Some(&MULTI_LEVEL) {
        return true;
    }

    p == pattern.len() && t == topic.len()
}
