//! Character-by-character headline animation.
//!
//! The headline's markup is flattened into styled characters up front. The
//! animation then runs as `Pending -> Running -> Done`: tick `k` fires at
//! `k * interval` after start, ticks `0..n` each emit one character and tick
//! `n` hides the cursor. Nothing restarts a finished animation.

use serde::Serialize;

pub const GRADIENT_CLASS: &str = "text-gradient-orange";
pub const OUTPUT_CLASS: &str = "typewriter";
pub const CURSOR_CLASS: &str = "type-cursor";
pub const CURSOR_HIDDEN_CLASS: &str = "hide";

/// Headline content as read from the DOM, keeping only what the effect needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlineNode {
    Text(String),
    Element {
        classes: Vec<String>,
        children: Vec<HeadlineNode>,
    },
}

impl HeadlineNode {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn element(classes: &[&str], children: Vec<HeadlineNode>) -> Self {
        Self::Element {
            classes: classes.iter().map(|class| (*class).to_string()).collect(),
            children,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyledChar {
    pub ch: char,
    pub gradient: bool,
}

/// Flattens headline children into characters. The gradient flag is
/// inherited by every descendant of an element carrying the gradient class;
/// all other markup is dropped.
pub fn flatten(nodes: &[HeadlineNode]) -> Vec<StyledChar> {
    let mut chars = Vec::new();
    for node in nodes {
        collect(node, false, &mut chars);
    }
    chars
}

fn collect(node: &HeadlineNode, gradient: bool, out: &mut Vec<StyledChar>) {
    match node {
        HeadlineNode::Text(text) => {
            out.extend(text.chars().map(|ch| StyledChar { ch, gradient }));
        }
        HeadlineNode::Element { classes, children } => {
            let gradient = gradient || classes.iter().any(|class| class == GRADIENT_CLASS);
            for child in children {
                collect(child, gradient, out);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypewriterPhase {
    Pending,
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterTick {
    Emit(StyledChar),
    HideCursor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Typewriter {
    chars: Vec<StyledChar>,
    interval_ms: u32,
    emitted: usize,
    phase: TypewriterPhase,
}

impl Typewriter {
    pub fn new(chars: Vec<StyledChar>, interval_ms: u32) -> Self {
        Self {
            chars,
            interval_ms: interval_ms.max(1),
            emitted: 0,
            phase: TypewriterPhase::Pending,
        }
    }

    pub fn from_nodes(nodes: &[HeadlineNode], interval_ms: u32) -> Self {
        Self::new(flatten(nodes), interval_ms)
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Moves `Pending` to `Running`. Returns false when already started.
    pub fn start(&mut self) -> bool {
        if self.phase != TypewriterPhase::Pending {
            return false;
        }
        self.phase = TypewriterPhase::Running;
        true
    }

    /// Fires the next tick. `None` unless running.
    pub fn tick(&mut self) -> Option<TypewriterTick> {
        if self.phase != TypewriterPhase::Running {
            return None;
        }
        match self.chars.get(self.emitted).copied() {
            Some(styled) => {
                self.emitted += 1;
                Some(TypewriterTick::Emit(styled))
            }
            None => {
                self.phase = TypewriterPhase::Done;
                Some(TypewriterTick::HideCursor)
            }
        }
    }

    /// Fires every tick due at or before `elapsed_ms` since start.
    pub fn advance_to(&mut self, elapsed_ms: u64) -> Vec<TypewriterTick> {
        let due = elapsed_ms / u64::from(self.interval_ms) + 1;
        let mut ticks = Vec::new();
        while (self.ticks_fired() as u64) < due {
            let Some(tick) = self.tick() else {
                break;
            };
            ticks.push(tick);
        }
        ticks
    }

    fn ticks_fired(&self) -> usize {
        match self.phase {
            TypewriterPhase::Pending => 0,
            TypewriterPhase::Running => self.emitted,
            TypewriterPhase::Done => self.emitted + 1,
        }
    }

    /// Milliseconds from start until the cursor hides.
    pub fn total_duration_ms(&self) -> u64 {
        self.chars.len() as u64 * u64::from(self.interval_ms)
    }

    pub fn visible_text(&self) -> String {
        self.chars[..self.emitted].iter().map(|styled| styled.ch).collect()
    }

    pub fn final_text(&self) -> String {
        self.chars.iter().map(|styled| styled.ch).collect()
    }

    pub fn cursor_hidden(&self) -> bool {
        self.phase == TypewriterPhase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headline() -> Vec<HeadlineNode> {
        vec![
            HeadlineNode::text("Build "),
            HeadlineNode::element(
                &["text-gradient-orange", "fw-bold"],
                vec![
                    HeadlineNode::text("real "),
                    HeadlineNode::element(&["small"], vec![HeadlineNode::text("skills")]),
                ],
            ),
            HeadlineNode::element(&["muted"], vec![HeadlineNode::text("!")]),
        ]
    }

    #[test]
    fn flatten_keeps_only_gradient_marker() {
        let chars = flatten(&headline());
        let text: String = chars.iter().map(|styled| styled.ch).collect();
        assert_eq!(text, "Build real skills!");
        assert!(!chars[0].gradient);
        assert!(chars[6].gradient);
        // nested child of the gradient span inherits the flag
        assert!(chars[11].gradient);
        assert!(!chars[17].gradient);
    }

    #[test]
    fn ticks_follow_the_virtual_clock() {
        let mut typewriter = Typewriter::from_nodes(&headline(), 45);
        assert_eq!(typewriter.advance_to(500), Vec::new());
        assert!(typewriter.start());

        let first = typewriter.advance_to(0);
        assert_eq!(
            first,
            vec![TypewriterTick::Emit(StyledChar { ch: 'B', gradient: false })]
        );
        assert_eq!(typewriter.advance_to(44).len(), 0);
        assert_eq!(typewriter.advance_to(90).len(), 2);
        assert_eq!(typewriter.visible_text(), "Bui");

        let rest = typewriter.advance_to(typewriter.total_duration_ms());
        assert_eq!(rest.last(), Some(&TypewriterTick::HideCursor));
        assert_eq!(typewriter.visible_text(), typewriter.final_text());
        assert!(typewriter.cursor_hidden());
        assert_eq!(typewriter.phase(), TypewriterPhase::Done);
    }

    #[test]
    fn intermediate_output_is_strict_prefix() {
        let mut typewriter = Typewriter::from_nodes(&headline(), 45);
        typewriter.start();
        let final_text = typewriter.final_text();
        let mut emitted = 0;
        while let Some(tick) = typewriter.tick() {
            let TypewriterTick::Emit(_) = tick else {
                break;
            };
            emitted += 1;
            let visible = typewriter.visible_text();
            assert!(final_text.starts_with(&visible));
            if emitted < typewriter.len() {
                assert!(visible.len() < final_text.len());
            }
            assert!(!typewriter.cursor_hidden());
        }
        assert!(typewriter.cursor_hidden());
        assert_eq!(typewriter.visible_text(), final_text);
    }

    #[test]
    fn finished_animation_is_not_restarted() {
        let mut typewriter = Typewriter::from_nodes(&[], 45);
        assert!(typewriter.start());
        assert_eq!(typewriter.tick(), Some(TypewriterTick::HideCursor));
        assert!(!typewriter.start());
        assert_eq!(typewriter.tick(), None);
        assert_eq!(typewriter.visible_text(), "");
    }
}
