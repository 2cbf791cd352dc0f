use askama::Template;

/// Upload form. No values.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage<'a> {
    pub personality: &'a str,
    pub improvement: &'a str,
}
