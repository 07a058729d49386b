use yew::prelude::*;
use yew_hooks::prelude::*;

/// Character-by-character type/hold/delete cycle over a list of phrases.
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    shown: usize,
    deleting: bool,
    hold_ticks: u32,
    held: u32,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, hold_ticks: u32) -> Self {
        Self {
            phrases,
            phrase: 0,
            shown: 0,
            deleting: false,
            hold_ticks,
            held: 0,
        }
    }

    fn current(&self) -> &str {
        self.phrases.get(self.phrase).map(String::as_str).unwrap_or_default()
    }

    fn current_len(&self) -> usize {
        self.current().chars().count()
    }

    pub fn text(&self) -> String {
        self.current().chars().take(self.shown).collect()
    }

    pub fn tick(&mut self) {
        if self.phrases.is_empty() {
            return;
        }
        if self.deleting {
            if self.shown > 0 {
                self.shown -= 1;
            } else {
                self.deleting = false;
                self.phrase = (self.phrase + 1) % self.phrases.len();
            }
        } else if self.shown < self.current_len() {
            self.shown += 1;
        } else if self.held < self.hold_ticks {
            self.held += 1;
        } else {
            self.held = 0;
            self.deleting = true;
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TypingTextProps {
    pub phrases: Vec<String>,
    #[prop_or(90)]
    pub tick_ms: u32,
    #[prop_or(20)]
    pub hold_ticks: u32,
}

#[function_component(TypingText)]
pub fn typing_text(props: &TypingTextProps) -> Html {
    let writer = use_state(|| Typewriter::new(props.phrases.clone(), props.hold_ticks));

    {
        let writer = writer.clone();
        use_interval(
            move || {
                let mut next = (*writer).clone();
                next.tick();
                writer.set(next);
            },
            props.tick_ms,
        );
    }

    html! {
        <span class="typing-text">
            { writer.text() }
            <span class="typing-cursor">{"|"}</span>
        </span>
    }
}
