use crate::SchematicError;

/// Title block metadata of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(build_fn(error = "SchematicError"))]
pub struct TitleBlock {
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into), default)]
    pub date: String,
    #[builder(setter(into), default)]
    pub rev: String,
    #[builder(setter(into), default)]
    pub company: String,
    /// Numbered from 1 in insertion order.
    #[builder(setter(custom), default = "Vec::new()")]
    pub comments: Vec<String>,
}

impl TitleBlockBuilder {
    pub fn comment(&mut self, comment: &str) -> &mut Self {
        self.comments
            .get_or_insert_with(Vec::new)
            .push(comment.to_string());
        self
    }
}
