use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use poolkb_sdk::{
    ApiError, ApiKeyCreate, ApiKeyType, ChatOptions, DEFAULT_TOP_K, Language, PostCreate,
    PostListQuery, PostUpdate, SearchStatus,
};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::application::dictionaries::{language_name, t, t_fmt};
use crate::infra::setup::AppContext;

/// Pool knowledge base command-line client
#[derive(Debug, Parser)]
#[command(name = "poolkb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Language for this run (zh-CN or en), overriding the saved preference
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse published posts
    Posts {
        #[command(subcommand)]
        action: PostsCommand,
    },

    /// Semantic search over the knowledge base
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: u32,
    },

    /// Ask the knowledge agent a question
    Chat {
        message: String,
        /// Agent to talk to (default: knowledge)
        #[arg(long)]
        agent: Option<String>,
        /// Post the question is about
        #[arg(long)]
        post_id: Option<String>,
    },

    /// Show or change the saved language preference
    Lang {
        #[command(subcommand)]
        action: LangCommand,
    },

    /// Administration endpoints (requires POOLKB_ADMIN_TOKEN except for login)
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    Get {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum LangCommand {
    Show,
    Set { language: Language },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Log in and print the access token
    Login {
        #[arg(long)]
        username: String,
        /// Falls back to POOLKB_ADMIN_PASSWORD
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the logged-in admin
    Me,
    Logout,
    Posts {
        #[command(subcommand)]
        action: AdminPostsCommand,
    },
    Keys {
        #[command(subcommand)]
        action: KeysCommand,
    },
    Models {
        #[command(subcommand)]
        action: ModelsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminPostsCommand {
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Repeat for several tags
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replaces all tags when given
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeysCommand {
    /// Keys currently in effect, per provider
    Effective,
    List,
    Save {
        #[arg(long = "type", value_enum)]
        key_type: KeyKind,
        #[arg(long)]
        name: String,
        #[arg(long)]
        value: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ModelsCommand {
    List,
    Switch { model: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyKind {
    Openai,
    Google,
}

impl From<KeyKind> for ApiKeyType {
    fn from(kind: KeyKind) -> Self {
        match kind {
            KeyKind::Openai => ApiKeyType::OpenAi,
            KeyKind::Google => ApiKeyType::Google,
        }
    }
}

pub async fn run(app: &AppContext, command: Command) -> anyhow::Result<()> {
    let lang = app.language;

    match command {
        Command::Posts { action } => match action {
            PostsCommand::List { skip, limit } => {
                let list = app.web.get_posts(Some(&PostListQuery { skip, limit })).await?;
                if list.posts.is_empty() {
                    println!("{}", t(lang, "posts.noPosts"));
                } else {
                    print_json(&list)?;
                }
            }
            PostsCommand::Get { id } => match app.web.get_post(&id).await {
                Ok(post) => print_json(&post)?,
                Err(err) if is_not_found(&err) => bail!(t(lang, "detail.notFound")),
                Err(err) => return Err(err.into()),
            },
        },

        Command::Search { query, top_k } => {
            let response = app.web.search_posts(&query, top_k).await?;
            eprintln!("{}", t_fmt(lang, "search.title", &[("query", &query)]));
            if response.status == SearchStatus::NotFound || response.results.is_empty() {
                println!("{}", t(lang, "search.noResults"));
            } else {
                print_json(&response)?;
            }
        }

        Command::Chat {
            message,
            agent,
            post_id,
        } => {
            let options = ChatOptions {
                agent_name: agent,
                post_id,
                language: None,
            };
            let response = app
                .web
                .chat_with_agent(&message, &options)
                .await
                .map_err(|err| {
                    warn!(error = %err, "chat request failed");
                    anyhow::anyhow!(t(lang, "chat.error"))
                })?;
            print_json(&response)?;
        }

        Command::Lang { action } => match action {
            LangCommand::Show => {
                let name = language_name(lang, lang);
                println!("{}", t_fmt(lang, "lang.current", &[("language", &name)]));
            }
            LangCommand::Set { language } => {
                app.locale_store.set(language).with_context(|| {
                    format!(
                        "failed to update {}",
                        app.locale_store.path().display()
                    )
                })?;
                let name = language_name(language, language);
                println!("{}", t_fmt(language, "lang.changed", &[("language", &name)]));
            }
        },

        Command::Admin { action } => run_admin(app, action).await?,
    }

    Ok(())
}

async fn run_admin(app: &AppContext, command: AdminCommand) -> anyhow::Result<()> {
    let lang = app.language;
    let admin = &app.admin;

    match command {
        AdminCommand::Login { username, password } => {
            let from_flag = password.map(|p| SecretString::new(p.into()));
            let password = from_flag
                .as_ref()
                .or(app.config.admin_password.as_ref())
                .context("missing password: pass --password or set POOLKB_ADMIN_PASSWORD")?;

            let response = admin.login(&username, password).await?;
            eprintln!(
                "{}",
                t_fmt(lang, "admin.loggedIn", &[("username", &response.admin.username)])
            );
            print_json(&json!({
                "access_token": response.access_token,
                "token_type": response.token_type,
                "admin": response.admin,
            }))?;
            eprintln!("{}", t(lang, "admin.tokenHint"));
        }
        AdminCommand::Me => print_json(&admin.get_info().await?)?,
        AdminCommand::Logout => {
            admin.logout().await?;
            println!("{}", t(lang, "admin.loggedOut"));
        }

        AdminCommand::Posts { action } => match action {
            AdminPostsCommand::List { skip, limit } => {
                let list = admin
                    .fetch_post_list(Some(&PostListQuery { skip, limit }))
                    .await?;
                print_json(&list)?;
            }
            AdminPostsCommand::Get { id } => match admin.fetch_post(&id).await {
                Ok(post) => print_json(&post)?,
                Err(err) if is_not_found(&err) => bail!(t(lang, "detail.notFound")),
                Err(err) => return Err(err.into()),
            },
            AdminPostsCommand::Create {
                title,
                content,
                tags,
            } => {
                let post = admin
                    .create_post(&PostCreate {
                        title,
                        content,
                        tags,
                    })
                    .await?;
                print_json(&post)?;
            }
            AdminPostsCommand::Update {
                id,
                title,
                content,
                tags,
                active,
            } => {
                let update = PostUpdate {
                    title,
                    content,
                    tags: (!tags.is_empty()).then_some(tags),
                    is_active: active,
                };
                print_json(&admin.update_post(&id, &update).await?)?;
            }
            AdminPostsCommand::Delete { id } => {
                admin.delete_post(&id).await?;
                println!("{}", t_fmt(lang, "admin.deleted", &[("id", &id)]));
            }
        },

        AdminCommand::Keys { action } => match action {
            KeysCommand::Effective => print_json(&admin.fetch_effective_keys().await?)?,
            KeysCommand::List => print_json(&admin.list_api_keys().await?)?,
            KeysCommand::Save {
                key_type,
                name,
                value,
                description,
            } => {
                let key = ApiKeyCreate {
                    key_type: key_type.into(),
                    key_name: name,
                    key_value: value,
                    description,
                };
                print_json(&admin.save_api_key(&key).await?)?;
            }
        },

        AdminCommand::Models { action } => match action {
            ModelsCommand::List => print_json(&admin.fetch_models().await?)?,
            ModelsCommand::Switch { model } => {
                let result = admin.switch_model(&model).await?;
                eprintln!("{}", t_fmt(lang, "admin.modelSwitched", &[("model", &model)]));
                print_json(&result)?;
            }
        },
    }

    Ok(())
}

fn is_not_found(err: &ApiError) -> bool {
    err.code() == Some(404) || matches!(err, ApiError::Status { status: 404, .. })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_defaults_top_k() {
        let cli = Cli::try_parse_from(["poolkb", "search", "vector db"]).unwrap();
        match cli.command {
            Command::Search { query, top_k } => {
                assert_eq!(query, "vector db");
                assert_eq!(top_k, DEFAULT_TOP_K);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.lang, None);
    }

    #[test]
    fn test_parse_global_lang_after_subcommand() {
        let cli = Cli::try_parse_from(["poolkb", "chat", "hello", "--post-id", "p1", "--lang", "en-US"])
            .unwrap();
        assert_eq!(cli.lang, Some(Language::En));
        match cli.command {
            Command::Chat { message, agent, post_id } => {
                assert_eq!(message, "hello");
                assert_eq!(agent, None);
                assert_eq!(post_id.as_deref(), Some("p1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["poolkb", "lang", "set", "fr"]).is_err());
    }

    #[test]
    fn test_parse_admin_key_save() {
        let cli = Cli::try_parse_from([
            "poolkb", "admin", "keys", "save", "--type", "openai", "--name", "primary", "--value",
            "sk-test",
        ])
        .unwrap();
        match cli.command {
            Command::Admin {
                action:
                    AdminCommand::Keys {
                        action: KeysCommand::Save { key_type, name, .. },
                    },
            } => {
                assert_eq!(ApiKeyType::from(key_type), ApiKeyType::OpenAi);
                assert_eq!(name, "primary");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_admin_post_update_tags() {
        let cli = Cli::try_parse_from([
            "poolkb", "admin", "posts", "update", "42", "--tag", "rag", "--tag", "llm", "--active",
            "false",
        ])
        .unwrap();
        match cli.command {
            Command::Admin {
                action:
                    AdminCommand::Posts {
                        action: AdminPostsCommand::Update { id, tags, active, title, .. },
                    },
            } => {
                assert_eq!(id, "42");
                assert_eq!(tags, vec!["rag", "llm"]);
                assert_eq!(active, Some(false));
                assert_eq!(title, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lang_set_persists_preference() {
        use crate::infra::{config::CliConfig, setup::init_app};
        use std::time::Duration;

        let path = std::env::temp_dir()
            .join(format!("poolkb-cli-{}", std::process::id()))
            .join("settings.json");
        let config = CliConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(1),
            settings_path: path.clone(),
            admin_token: None,
            admin_password: None,
            log_json: false,
        };
        let app = init_app(config, None).unwrap();
        assert_eq!(app.language, Language::ZhCn);

        run(
            &app,
            Command::Lang {
                action: LangCommand::Set {
                    language: Language::En,
                },
            },
        )
        .await
        .unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["language"], "en");
        // Web requests from the same context now pick up the new preference.
        assert_eq!(
            poolkb_sdk::effective_language(&app.locale_store),
            Language::En
        );

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_not_found_detection() {
        let envelope = ApiError::Api {
            code: 404,
            message: "Post not found".into(),
        };
        let status = ApiError::Status {
            status: 404,
            body: String::new(),
        };
        let other = ApiError::Api {
            code: 500,
            message: "boom".into(),
        };
        assert!(is_not_found(&envelope));
        assert!(is_not_found(&status));
        assert!(!is_not_found(&other));
    }
}
