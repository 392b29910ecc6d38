//! Structured templates compiled from a catalog and rendered through the public API.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::sync::Arc;

use js_i18n_runtime::message_format::{
    CompileError,
    compile,
};
use js_i18n_runtime::{
    Catalog,
    LocaleContext,
    Translator,
    registry,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const READ_MORE: &str = "There {UNREAD, plural, =0 {} one {{BOTH, select, true {is } false {is } other {}}<a href='{basePath}/unread'>1 unread</a>} other {{BOTH, select, true {are } false {are } other {}}<a href='{basePath}/unread'># unread</a>}}{NEW, plural, =0 {} one {{BOTH, select, true { and } false {is } other {}}<a href='{basePath}/new'>1 new</a> topic} other {{BOTH, select, true { and } false {are } other {}}<a href='{basePath}/new'># new</a> topics}} remaining, or {CATEGORY, select, true {browse other topics in {catLink}} false {{latestLink}} other {}}";

const TOPICS_RU: &str = "{COUNT, plural, =0 {Нет тем} one {# тема} few {# темы} other {# тем}}";

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::from_json(&json!({
            "en": {"js": {"topic": {"read_more_MF": READ_MORE}}},
            "ru": {"js": {"topic": {"count_MF": TOPICS_RU, "broken_MF": "{COUNT, plural, other {#}"}}}
        }))
        .unwrap(),
    )
}

#[test]
fn test_read_more_is_deterministic() {
    let translator = Translator::new(catalog());
    let ctx = LocaleContext::new("en");
    let data = json!({"UNREAD": 1, "NEW": 0, "basePath": "/b", "CATEGORY": false, "latestLink": "L"});

    let first = translator.message_format("topic.read_more_MF", &data, &ctx);
    let second = translator.message_format("topic.read_more_MF", &data, &ctx);

    assert_eq!(first, "There <a href='/b/unread'>1 unread</a> remaining, or L");
    assert_eq!(first, second);
}

#[test]
fn test_read_more_with_both_counts() {
    let translator = Translator::new(catalog());
    let data = json!({
        "UNREAD": 2,
        "NEW": 3,
        "BOTH": true,
        "basePath": "/b",
        "CATEGORY": true,
        "catLink": "<a href='/c/x'>x</a>"
    });

    let result = translator.message_format("topic.read_more_MF", &data, &LocaleContext::new("en"));

    assert_eq!(
        result,
        "There are <a href='/b/unread'>2 unread</a> and <a href='/b/new'>3 new</a> topics remaining, or browse other topics in <a href='/c/x'>x</a>"
    );
}

#[test]
fn test_unknown_template() {
    let translator = Translator::new(catalog());

    let result = translator.message_format("does.not.exist", &json!({}), &LocaleContext::new("en"));

    assert_eq!(result, "Missing Key: does.not.exist");
}

#[test]
fn test_russian_plural_dispatch() {
    let translator = Translator::new(catalog());
    let ctx = LocaleContext::new("ru");
    let render = |count: i64| translator.message_format("topic.count_MF", &json!({"COUNT": count}), &ctx);

    assert_eq!(render(0), "Нет тем");
    assert_eq!(render(1), "1 тема");
    assert_eq!(render(4), "4 темы");
    assert_eq!(render(12), "12 тем");
    assert_eq!(render(101), "101 тема");
}

#[test]
fn test_evaluation_errors_render_as_text() {
    let translator = Translator::new(catalog());
    let ctx = LocaleContext::new("ru");

    assert_eq!(
        translator.message_format("topic.count_MF", &serde_json::Value::Null, &ctx),
        "MessageFormat: No data passed to function."
    );
    assert_eq!(
        translator.message_format("topic.count_MF", &json!({"COUNT": "many"}), &ctx),
        "MessageFormat: `COUNT` isnt a number."
    );
    assert_eq!(
        translator.message_format("topic.read_more_MF", &json!({}), &LocaleContext::new("en")),
        "MessageFormat: `UNREAD` isnt a number."
    );
}

#[test]
fn test_invalid_templates_are_skipped() {
    let catalog = catalog();
    let registry = catalog.message_formats("ru").unwrap();

    assert!(registry.contains("topic.count_MF"));
    assert!(!registry.contains("topic.broken_MF"));
    assert_eq!(
        compile("{COUNT, plural, other {#}").unwrap_err(),
        CompileError::UnexpectedEnd { position: 25, expected: "'}'" }
    );
}

#[test]
fn test_registry_serves_installed_catalog() {
    registry::install(catalog());

    let installed = registry::current();
    let ru = installed.message_formats("ru").unwrap();

    assert_eq!(ru.render("topic.count_MF", &json!({"COUNT": 2})), "2 темы");
}
