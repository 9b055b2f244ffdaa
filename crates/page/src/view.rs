use crate::node::{Element, Node};
use domain::{Comment, Contribution, Reaction};

/// In-memory model of the thread fragment the poller patches:
/// `#contrib-container` holding one `#contrib-<id>` block per post,
/// each with its own `#comments-for-<id>` list and reaction counters.
#[derive(Debug, Clone)]
pub struct ThreadPage {
    container: Element,
}

const CONTAINER_ID: &str = "contrib-container";

impl ThreadPage {
    pub fn new() -> Self {
        Self {
            container: Element::new("div").with_id(CONTAINER_ID),
        }
    }

    /// New contributions go to the top of the container, in the order
    /// they arrive.
    pub fn insert_contribution(&mut self, c: &Contribution) {
        self.container
            .prepend(Node::Element(contribution_block(c)));
    }

    /// Returns false when the target contribution is not on the page;
    /// the caller drops the comment in that case.
    pub fn append_comment(&mut self, cm: &Comment) -> bool {
        let list_id = format!("comments-for-{}", cm.contrib_id);
        match self.container.find_by_id_mut(&list_id) {
            Some(list) => {
                list.append(Node::Element(comment_item(cm)));
                true
            }
            None => false,
        }
    }

    /// Locates the like/dislike counters for the reaction's
    /// contribution. The tallies themselves are not applied.
    // TODO: patch the counters from like_count/dislike_count once the
    // endpoint sends tallies instead of per-reaction rows.
    pub fn observe_reaction(&self, r: &Reaction) -> bool {
        let Some(block) = self.container.find_by_id(&format!("contrib-{}", r.contrib_id)) else {
            return false;
        };
        block.find_by_class("like-count").is_some()
            && block.find_by_class("dislike-count").is_some()
    }

    pub fn contains_contribution(&self, id: i64) -> bool {
        self.container
            .find_by_id(&format!("contrib-{}", id))
            .is_some()
    }

    pub fn contribution_count(&self) -> usize {
        self.container.children().len()
    }

    /// Contribution ids top to bottom, i.e. newest first.
    pub fn contribution_ids(&self) -> Vec<i64> {
        self.container
            .children()
            .iter()
            .filter_map(|n| match n {
                Node::Element(el) => el
                    .id()
                    .and_then(|id| id.strip_prefix("contrib-"))
                    .and_then(|raw| raw.parse().ok()),
                Node::Text(_) => None,
            })
            .collect()
    }

    pub fn comment_count_for(&self, contrib_id: i64) -> Option<usize> {
        self.container
            .find_by_id(&format!("comments-for-{}", contrib_id))
            .map(|list| list.children().len())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.container.find_by_id(id)
    }

    pub fn render(&self) -> String {
        self.container.render()
    }
}

impl Default for ThreadPage {
    fn default() -> Self {
        Self::new()
    }
}

fn contribution_block(c: &Contribution) -> Element {
    let body = match c.body_text() {
        Some(text) => Node::Text(text.to_string()),
        None => Node::Element(
            Element::new("a")
                .with_attr("href", c.file_url.as_deref().unwrap_or("#"))
                .with_attr("target", "_blank")
                .text("\u{1F4CE} Fichier"),
        ),
    };

    Element::new("div")
        .with_id(c.dom_id())
        .child(Node::Element(Element::new("strong").text(c.author.as_str())))
        .text(" ")
        .child(Node::Element(
            Element::new("em").text(c.posted_at.format("%H:%M:%S").to_string()),
        ))
        .child(Node::Element(Element::new("br")))
        .child(body)
        .child(Node::Element(
            Element::new("span").with_class("like-count").text("0"),
        ))
        .child(Node::Element(
            Element::new("span").with_class("dislike-count").text("0"),
        ))
        .child(Node::Element(
            Element::new("ul").with_id(format!("comments-for-{}", c.id)),
        ))
}

fn comment_item(cm: &Comment) -> Element {
    Element::new("li").text(format!(
        "{} ({}): {}",
        cm.author,
        cm.commented_at.format("%H:%M:%S"),
        cm.content
    ))
}
