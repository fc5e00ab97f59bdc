use pulldown_cmark::{html, Options, Parser};

/// Renders announcement markdown to HTML.
///
/// Raw HTML in the source is passed through unchanged; announcements are authored by admins only.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);

    output
}
