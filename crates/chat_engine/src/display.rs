//! Converts chat box markup into styled lines for a text display.
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub speaker: Speaker,
    pub thinking: bool,
    pub lines: Vec<Vec<Span>>,
}

impl DisplayMessage {
    /// Lines without styling, mostly useful in logs and tests.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FragmentRenderer;

impl FragmentRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders one message wrapper. Markup without a recognised wrapper is
    /// treated as a bot message body.
    pub fn render(&self, markup: &str) -> DisplayMessage {
        let fragment = Html::parse_fragment(markup);
        let wrapper = Selector::parse("div.msg-wrapper")
            .ok()
            .and_then(|sel| fragment.select(&sel).next());

        let (speaker, thinking) = match wrapper {
            Some(element) => {
                let classes: Vec<&str> = element.value().classes().collect();
                let speaker = if classes.contains(&"user-wrapper") {
                    Speaker::User
                } else {
                    Speaker::Bot
                };
                (speaker, classes.contains(&"thinking"))
            }
            None => (Speaker::Bot, false),
        };

        let body = Selector::parse("div.message")
            .ok()
            .and_then(|sel| fragment.select(&sel).next());

        let mut ctx = LineBuilder::default();
        match body {
            Some(element) => {
                for child in element.children() {
                    self.visit_node(child, false, &mut ctx);
                }
            }
            None => {
                for child in fragment.root_element().children() {
                    self.visit_node(child, false, &mut ctx);
                }
            }
        }

        DisplayMessage {
            speaker,
            thinking,
            lines: ctx.finish(),
        }
    }

    fn visit_node(&self, node: NodeRef<'_, Node>, bold: bool, ctx: &mut LineBuilder) {
        match node.value() {
            Node::Text(text) => ctx.append_text(text, bold),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element, bold, ctx);
                }
            }
            _ => {
                for child in node.children() {
                    self.visit_node(child, bold, ctx);
                }
            }
        }
    }

    fn visit_element(&self, element: ElementRef<'_>, bold: bool, ctx: &mut LineBuilder) {
        match element.value().name() {
            "br" => ctx.break_line(),
            "img" => {}
            "strong" | "b" => {
                for child in element.children() {
                    self.visit_node(child, true, ctx);
                }
            }
            _ => {
                for child in element.children() {
                    self.visit_node(child, bold, ctx);
                }
            }
        }
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Vec<Span>>,
    current: Vec<Span>,
}

impl LineBuilder {
    fn append_text(&mut self, text: &str, bold: bool) {
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            self.push_span(part, bold);
            if parts.peek().is_some() {
                self.break_line();
            }
        }
    }

    fn push_span(&mut self, text: &str, bold: bool) {
        if text.is_empty() {
            return;
        }
        match self.current.last_mut() {
            Some(last) if last.bold == bold => last.text.push_str(text),
            _ => self.current.push(Span {
                text: text.to_string(),
                bold,
            }),
        }
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
    }

    fn finish(mut self) -> Vec<Vec<Span>> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}
