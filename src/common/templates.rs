use crate::models::github::GithubUser;
use crate::settings::AppSettings;
use minijinja::{AutoEscape, Environment, Error, Output, State, Value, escape_formatter};
use serde::Serialize;
use std::fmt::Write;
use std::sync::LazyLock;

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("message.html", include_str!("../../templates/message.html")),
    ("logbase.html", include_str!("../../templates/logbase.html")),
];

/// HTML escaping that leaves `/` alone, so urls in attributes and text stay
/// readable.
fn write_html_escaped(out: &mut Output, text: &str) -> std::fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&#x27;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

fn html_formatter(out: &mut Output, state: &State, value: &Value) -> Result<(), Error> {
    match (state.auto_escape(), value.as_str()) {
        (AutoEscape::Html, Some(text)) if !value.is_safe() => {
            write_html_escaped(out, text).map_err(Error::from)
        }
        _ => escape_formatter(out, state, value),
    }
}

fn environment() -> &'static Environment<'static> {
    static ENVIRONMENT: LazyLock<Environment<'static>> = LazyLock::new(|| {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("Failed to parse embedded template");
        }
        env
    });
    &ENVIRONMENT
}

/// Renders one of the embedded templates. Autoescaping is on for all of them.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, minijinja::Error> {
    environment().get_template(name)?.render(ctx)
}

/// What every site page needs to know about the visitor, passed explicitly
/// by the handler.
#[derive(Serialize)]
pub struct PageContext {
    pub main_url: String,
    pub dashboard_url: String,
    pub user: Option<GithubUser>,
}

impl PageContext {
    pub fn new(settings: &AppSettings, user: Option<GithubUser>) -> Self {
        Self {
            main_url: settings.main_url(),
            dashboard_url: settings.site_url("dashboard"),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn page(user: Option<GithubUser>) -> PageContext {
        PageContext {
            main_url: "https://modmail.tk".into(),
            dashboard_url: "https://dashboard.modmail.tk".into(),
            user,
        }
    }

    #[test]
    fn all_templates_parse() {
        for (name, _) in TEMPLATES {
            assert!(environment().get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn message_page_renders_trusted_markup() {
        let html = render(
            "message.html",
            context! {
                title => "Already Logged In!",
                message => "Please use the <code>github logout</code> command.",
                page => page(None),
            },
        )
        .unwrap();
        assert!(html.contains("<code>github logout</code>"));
        assert!(html.contains("https://modmail.tk/login"));
    }

    #[test]
    fn dashboard_shows_logged_in_user() {
        let user = GithubUser {
            id: 1,
            login: "kyb3r".into(),
            avatar_url: "https://avatars.githubusercontent.com/u/1".into(),
            html_url: "https://github.com/kyb3r".into(),
        };
        let html = render(
            "dashboard.html",
            context! {
                title => "Hey there!",
                token => "abc123",
                has_starred => true,
                page => page(Some(user)),
            },
        )
        .unwrap();
        assert!(html.contains(r#"<code id="token">abc123</code>"#));
        assert!(html.contains("https://modmail.tk/logout"));
        assert!(html.contains("Thanks for starring"));
    }

    #[test]
    fn escapes_markup_but_not_slashes() {
        let html = render(
            "index.html",
            context! {
                title => "<b>Modmail</b>",
                message => "Tom & \"Jerry\"",
                page => page(None),
            },
        )
        .unwrap();
        assert!(html.contains("<title>&lt;b&gt;Modmail&lt;/b&gt;</title>"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(html.contains(r#"href="https://modmail.tk/static/css/site.css""#));
        assert!(!html.contains("&#x2f;"));
    }
}
