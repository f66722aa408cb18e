//! `!`-prefixed directives and their key action sequences.

use embassy_time::Duration;
use keybridge_types::action::{KeyAction, ReleasePolicy};
use keybridge_types::keycode::{HidKeyCode, usage};

use crate::fmt::Text;
use crate::interpreter::Step;

/// Prefix of the function key family, `!F1` ..= `!F12`
const FUNCTION_KEY_PREFIX: &[u8] = b"!F";
/// Longest token the function key family accepts
const FUNCTION_KEY_MAX_LEN: usize = 4;

/// A named directive: the steps it runs and how its keys are released afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub name: &'static str,
    pub body: &'static [Step],
    pub release: ReleasePolicy,
}

impl Directive {
    /// Steps of the directive, followed by its release steps
    pub fn expand(&'static self) -> Expansion {
        Expansion::new(Body::Table(self.body), Some(self.release))
    }
}

const fn press(key: HidKeyCode) -> Step {
    Step::Key(KeyAction::Press(key))
}

const fn press_raw(code: u8) -> Step {
    Step::Key(KeyAction::PressRaw(code))
}

const fn wait(ms: u64) -> Step {
    Step::Wait(Duration::from_millis(ms))
}

/// All directives matched by exact name
pub static DIRECTIVES: &[Directive] = &[
    // Single keys
    Directive { name: "!ENTER", body: &[press(HidKeyCode::Enter)], release: ReleasePolicy::Tap },
    Directive { name: "!TAB", body: &[press(HidKeyCode::Tab)], release: ReleasePolicy::Tap },
    Directive { name: "!ESC", body: &[press(HidKeyCode::Escape)], release: ReleasePolicy::Tap },
    Directive { name: "!BACKSPACE", body: &[press(HidKeyCode::Backspace)], release: ReleasePolicy::Tap },
    Directive { name: "!UP", body: &[press(HidKeyCode::Up)], release: ReleasePolicy::Tap },
    Directive { name: "!DOWN", body: &[press(HidKeyCode::Down)], release: ReleasePolicy::Tap },
    Directive { name: "!LEFT", body: &[press(HidKeyCode::Left)], release: ReleasePolicy::Tap },
    Directive { name: "!RIGHT", body: &[press(HidKeyCode::Right)], release: ReleasePolicy::Tap },
    // Modifier holds, released by `!RELEASE`
    Directive { name: "!HOLD+CTRL", body: &[press_raw(usage::LEFT_CTRL)], release: ReleasePolicy::Sticky },
    Directive { name: "!HOLD+ALT", body: &[press_raw(usage::LEFT_ALT)], release: ReleasePolicy::Sticky },
    Directive { name: "!HOLD+SHIFT", body: &[press_raw(usage::LEFT_SHIFT)], release: ReleasePolicy::Sticky },
    Directive { name: "!HOLD+SUPER", body: &[press_raw(usage::LEFT_GUI)], release: ReleasePolicy::Sticky },
    // Shortcuts
    Directive {
        name: "!CTRL+C",
        body: &[press(HidKeyCode::LCtrl), press(HidKeyCode::C)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!CTRL+V",
        body: &[press(HidKeyCode::LCtrl), press(HidKeyCode::V)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!CTRL+Z",
        body: &[press(HidKeyCode::LCtrl), press(HidKeyCode::Z)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!CTRL+A",
        body: &[press(HidKeyCode::LCtrl), press(HidKeyCode::A)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!CTRL+W",
        body: &[press(HidKeyCode::LCtrl), press(HidKeyCode::W)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!CTRL+S",
        body: &[press(HidKeyCode::LCtrl), press(HidKeyCode::S)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!CTRL+T",
        body: &[press(HidKeyCode::LCtrl), wait(20), press(HidKeyCode::T), wait(20)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!ALT+TAB",
        body: &[press(HidKeyCode::LAlt), press(HidKeyCode::Tab)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER",
        body: &[press_raw(usage::LEFT_GUI), wait(300)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER2",
        body: &[press(HidKeyCode::RGui), wait(200)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER+R",
        body: &[press(HidKeyCode::LGui), wait(20), press(HidKeyCode::R), wait(20)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER+D",
        body: &[press(HidKeyCode::LGui), wait(20), press(HidKeyCode::D), wait(20)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER+E",
        body: &[press(HidKeyCode::LGui), wait(20), press(HidKeyCode::E), wait(20)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER+A",
        body: &[press(HidKeyCode::LGui), wait(20), press(HidKeyCode::A), wait(20)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive {
        name: "!SUPER+L",
        body: &[press(HidKeyCode::LGui), wait(20), press(HidKeyCode::L), wait(20)],
        release: ReleasePolicy::AutoRelease,
    },
    Directive { name: "!RELEASE", body: &[], release: ReleasePolicy::AutoRelease },
];

/// Find a directive by its exact, case-sensitive name.
pub fn lookup(token: &[u8]) -> Option<&'static Directive> {
    DIRECTIVES.iter().find(|d| d.name.as_bytes() == token)
}

/// Resolve a trimmed `!`-prefixed token into its steps.
///
/// Exact names win over the function key family. Anything unknown resolves to
/// an empty expansion.
pub fn resolve(token: &[u8]) -> Expansion {
    if let Some(directive) = lookup(token) {
        return directive.expand();
    }

    if token.len() <= FUNCTION_KEY_MAX_LEN {
        if let Some(number) = token.strip_prefix(FUNCTION_KEY_PREFIX) {
            let n = atoi(number);
            return match u32::try_from(n).ok().and_then(HidKeyCode::function_key) {
                Some(key) => Expansion::new(Body::Key([press(key)]), Some(ReleasePolicy::Tap)),
                None => {
                    debug!("No function key F{}", n);
                    Expansion::empty()
                }
            };
        }
    }

    debug!("Unknown directive: {}", Text(token));
    Expansion::empty()
}

/// Parse a decimal number the way C `atoi` does: leading whitespace, an
/// optional sign, then as many digits as there are. No digits gives 0.
fn atoi(s: &[u8]) -> i32 {
    let start = s
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r'))
        .unwrap_or(s.len());
    let s = &s[start..];
    let (negative, digits) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, s),
    };
    let value = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i32, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i32));
    if negative { -value } else { value }
}

#[derive(Debug, Clone, Copy)]
enum Body {
    Table(&'static [Step]),
    Key([Step; 1]),
}

impl Body {
    fn steps(&self) -> &[Step] {
        match self {
            Body::Table(steps) => steps,
            Body::Key(steps) => steps,
        }
    }
}

/// Steps of one resolved directive: its body, then the release its policy asks for.
#[derive(Debug, Clone)]
pub struct Expansion {
    body: Body,
    // `None` for an unknown directive
    release: Option<ReleasePolicy>,
    next: usize,
    // Tap: body steps not yet scanned for keys to release, scanned backwards
    unwind: usize,
    released: bool,
}

impl Expansion {
    fn new(body: Body, release: Option<ReleasePolicy>) -> Self {
        Self {
            body,
            release,
            next: 0,
            unwind: body.steps().len(),
            released: false,
        }
    }

    /// An expansion without any step
    pub fn empty() -> Self {
        Self::new(Body::Table(&[]), None)
    }

    /// Release policy of the resolved directive, `None` if nothing was resolved
    pub fn release(&self) -> Option<ReleasePolicy> {
        self.release
    }
}

impl Iterator for Expansion {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let body = self.body.steps();
        if let Some(step) = body.get(self.next) {
            self.next += 1;
            return Some(*step);
        }
        match self.release? {
            ReleasePolicy::Tap => {
                while self.unwind > 0 {
                    self.unwind -= 1;
                    if let Some(Step::Key(KeyAction::Press(key))) = body.get(self.unwind) {
                        return Some(Step::Key(KeyAction::Release(*key)));
                    }
                }
                None
            }
            ReleasePolicy::AutoRelease if !self.released => {
                self.released = true;
                Some(Step::Key(KeyAction::ReleaseAll))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(token: &str) -> heapless::Vec<Step, 16> {
        resolve(token.as_bytes()).collect()
    }

    #[test]
    fn test_names_are_unique() {
        for (i, d) in DIRECTIVES.iter().enumerate() {
            assert!(d.name.starts_with('!'));
            assert!(DIRECTIVES[i + 1..].iter().all(|other| other.name != d.name), "{}", d.name);
        }
    }

    #[test]
    fn test_sticky_holds_are_raw_modifiers() {
        for d in DIRECTIVES.iter().filter(|d| d.release == ReleasePolicy::Sticky) {
            assert!(d.name.starts_with("!HOLD+"));
            assert!(matches!(d.body, [Step::Key(KeyAction::PressRaw(0xE0..=0xE3))]));
        }
    }

    #[test]
    fn test_tap_releases_in_reverse() {
        static BODY: [Step; 3] = [press(HidKeyCode::LShift), wait(5), press(HidKeyCode::A)];
        let expansion: heapless::Vec<Step, 8> = Expansion::new(Body::Table(&BODY), Some(ReleasePolicy::Tap)).collect();
        assert_eq!(
            expansion.as_slice(),
            &[
                press(HidKeyCode::LShift),
                wait(5),
                press(HidKeyCode::A),
                Step::Key(KeyAction::Release(HidKeyCode::A)),
                Step::Key(KeyAction::Release(HidKeyCode::LShift)),
            ]
        );
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            steps("!ESC").as_slice(),
            &[press(HidKeyCode::Escape), Step::Key(KeyAction::Release(HidKeyCode::Escape))]
        );
        assert_eq!(steps("!RELEASE").as_slice(), &[Step::Key(KeyAction::ReleaseAll)]);
        assert_eq!(steps("!HOLD+SHIFT").as_slice(), &[press_raw(0xE1)]);
        assert!(steps("!enter").is_empty());
        assert!(steps("!ENTER ").is_empty());
        assert!(steps("!").is_empty());
    }

    #[test]
    fn test_release_policy_of_resolved() {
        assert_eq!(resolve(b"!ENTER").release(), Some(ReleasePolicy::Tap));
        assert_eq!(resolve(b"!F4").release(), Some(ReleasePolicy::Tap));
        assert_eq!(resolve(b"!CTRL+C").release(), Some(ReleasePolicy::AutoRelease));
        assert_eq!(resolve(b"!HOLD+ALT").release(), Some(ReleasePolicy::Sticky));
        // Unknown tokens carry no policy
        assert_eq!(resolve(b"!NOPE").release(), None);
        assert_eq!(resolve(b"!F13").release(), None);
        assert_eq!(Expansion::empty().release(), None);
    }

    #[test]
    fn test_atoi() {
        assert_eq!(atoi(b"7"), 7);
        assert_eq!(atoi(b"12"), 12);
        assert_eq!(atoi(b"07"), 7);
        assert_eq!(atoi(b" 3"), 3);
        assert_eq!(atoi(b"+1"), 1);
        assert_eq!(atoi(b"-1"), -1);
        assert_eq!(atoi(b"1x"), 1);
        assert_eq!(atoi(b"x"), 0);
        assert_eq!(atoi(b""), 0);
        assert_eq!(atoi(b"99999999999999"), i32::MAX);
    }

    #[test]
    fn test_function_key_family() {
        let f = |n: u32| HidKeyCode::function_key(n).unwrap();
        assert_eq!(
            steps("!F1").as_slice(),
            &[press(f(1)), Step::Key(KeyAction::Release(f(1)))]
        );
        assert_eq!(
            steps("!F12").as_slice(),
            &[press(f(12)), Step::Key(KeyAction::Release(f(12)))]
        );
        assert_eq!(
            steps("!F 9").as_slice(),
            &[press(f(9)), Step::Key(KeyAction::Release(f(9)))]
        );
        assert_eq!(steps("!F5x").as_slice(), &[press(f(5)), Step::Key(KeyAction::Release(f(5)))]);
        assert!(steps("!F0").is_empty());
        assert!(steps("!F13").is_empty());
        assert!(steps("!F-1").is_empty());
        assert!(steps("!Fx").is_empty());
        assert!(steps("!F").is_empty());
        // Too long for the family
        assert!(steps("!F001").is_empty());
    }
}
