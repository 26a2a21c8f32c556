use super::*;

#[test]
fn extract_redirect_links_unwraps_destinations() {
    let html = r#"
        <div><a href="/url?q=https://news.example.com/story-1&sa=U">Story 1</a></div>
        <div><a href="/url?q=http://other.example.org/story-2&ved=abc">Story 2</a></div>
    "#;
    let links = extract_redirect_links(html);
    assert_eq!(
        links,
        vec![
            "https://news.example.com/story-1".to_string(),
            "http://other.example.org/story-2".to_string(),
        ]
    );
}

#[test]
fn extract_redirect_links_ignores_plain_anchors() {
    let html = r#"<a href="https://news.example.com/direct">Direct</a>
                  <a href="/settings">Settings</a>"#;
    assert!(extract_redirect_links(html).is_empty());
}

#[test]
fn extract_redirect_links_keeps_document_order_and_caps_at_ten() {
    let mut html = String::new();
    for i in 0..15 {
        html.push_str(&format!(
            "<a href=\"/url?q=https://example.com/story-{i}&sa=U\">s</a>"
        ));
    }
    let links = extract_redirect_links(&html);
    assert_eq!(links.len(), 10);
    assert_eq!(links[0], "https://example.com/story-0");
    assert_eq!(links[9], "https://example.com/story-9");
}

#[test]
fn extract_redirect_links_empty_page_yields_empty_list() {
    assert!(extract_redirect_links("<html><body></body></html>").is_empty());
}

#[test]
fn search_cache_key_appends_suffix() {
    assert_eq!(search_cache_key("Acme"), "Acme_search");
}
