use once_cell::sync::Lazy;
use poolkb_sdk::Language;
use serde_json::Value;

static RAW_EN: &str = include_str!("../../dictionaries/en.json");
static RAW_ZH_CN: &str = include_str!("../../dictionaries/zh-CN.json");

static DICT_EN: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(RAW_EN).expect("failed to parse en dictionary"));
static DICT_ZH_CN: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(RAW_ZH_CN).expect("failed to parse zh-CN dictionary"));

/// Language consulted when a key is missing from the selected one.
pub const FALLBACK_LANGUAGE: Language = Language::En;

fn dictionary(lang: Language) -> &'static Value {
    match lang {
        Language::En => &*DICT_EN,
        Language::ZhCn => &*DICT_ZH_CN,
    }
}

fn lookup<'a>(dict: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(dict, |node, segment| node.get(segment))?
        .as_str()
}

/// Translate a dotted key such as `chat.error`.
///
/// Falls back to English, then to the key itself.
pub fn t(lang: Language, key: &str) -> String {
    resolve(dictionary(lang), dictionary(FALLBACK_LANGUAGE), key).to_string()
}

fn resolve<'a>(selected: &'a Value, fallback: &'a Value, key: &'a str) -> &'a str {
    lookup(selected, key)
        .or_else(|| lookup(fallback, key))
        .unwrap_or(key)
}

/// Translate and substitute `{name}` placeholders.
pub fn t_fmt(lang: Language, key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(lang, key), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

/// Display name of a language, in the given UI language.
pub fn language_name(ui: Language, language: Language) -> String {
    match language {
        Language::ZhCn => t(ui, "lang.zh"),
        Language::En => t(ui, "lang.en"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dictionaries_parse() {
        assert!(DICT_EN.is_object());
        assert!(DICT_ZH_CN.is_object());
    }

    #[test]
    fn test_lookup_selected_language() {
        assert_eq!(t(Language::En, "nav.posts"), "Posts");
        assert_eq!(t(Language::ZhCn, "nav.posts"), "文章");
        assert_eq!(t(Language::ZhCn, "detail.notFound"), "文章不存在");
    }

    #[test]
    fn test_missing_key_falls_back() {
        let selected = json!({"search": {"title": "搜索"}});
        let fallback = json!({"search": {"title": "Search", "noResults": "Nothing found"}});

        assert_eq!(resolve(&selected, &fallback, "search.title"), "搜索");
        assert_eq!(resolve(&selected, &fallback, "search.noResults"), "Nothing found");
        assert_eq!(resolve(&selected, &fallback, "search.page"), "search.page");
    }

    #[test]
    fn test_chinese_covers_every_english_key() {
        fn keys(node: &Value, prefix: &str, out: &mut Vec<String>) {
            match node {
                Value::Object(map) => {
                    for (name, child) in map {
                        let path = if prefix.is_empty() {
                            name.clone()
                        } else {
                            format!("{}.{}", prefix, name)
                        };
                        keys(child, &path, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }

        let mut english = Vec::new();
        keys(&DICT_EN, "", &mut english);
        for key in english {
            assert!(lookup(&DICT_ZH_CN, &key).is_some(), "zh-CN is missing {}", key);
        }
    }

    #[test]
    fn test_no_results_is_localized() {
        assert_eq!(t(Language::ZhCn, "search.noResults"), "未找到相关文章。");
        assert_eq!(t(Language::En, "search.noResults"), "No relevant posts found.");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(t(Language::En, "nav.missing"), "nav.missing");
        assert_eq!(t(Language::En, "nav"), "nav");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            t_fmt(Language::En, "chat.placeholderWithPost", &[("title", "RAG")]),
            "Ask about \"RAG\"... (Enter to send)"
        );
        assert_eq!(
            t_fmt(Language::ZhCn, "lang.changed", &[("language", "English")]),
            "语言已切换为 English"
        );
    }

    #[test]
    fn test_every_english_key_has_a_string() {
        for section in ["nav", "home", "posts", "detail", "chat", "lang"] {
            let entries = DICT_EN[section].as_object().unwrap();
            for (key, value) in entries {
                assert!(value.is_string(), "{}.{} is not a string", section, key);
            }
        }
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name(Language::En, Language::ZhCn), "中文");
        assert_eq!(language_name(Language::ZhCn, Language::En), "English");
    }
}
