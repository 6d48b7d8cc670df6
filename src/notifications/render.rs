//! HTML mail bodies
//!
//! Bodies are Handlebars templates rendered against the alert event plus its
//! `subject` and a `closed` flag. Open events expose `new_alert_count`,
//! `new_alerts` and `already_notified`; closed events expose `alerts`. Each
//! alert carries its fields (`event`, `resource`, `severity`, `environment`,
//! `text`, `url`, `attributes`, ...) and the `alert_row` partial renders one
//! table row. Values are HTML-escaped.

use super::events::{ClosedAlertsEvent, OpenAlertsEvent};
use crate::alerta::severity_color;
use crate::utils::error::{NotifierError, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

const BODY: &str = "body";
const ALERT_ROW: &str = "alert_row";

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: sans-serif;">
<h2>{{subject}}</h2>
<table cellpadding="6" style="border-collapse: collapse;">
{{#each new_alerts}}{{> alert_row}}
{{/each}}{{#each alerts}}{{> alert_row}}
{{/each}}</table>
{{#if already_notified}}<p style="color: #6c757d;">{{already_notified}} alert(s) were already notified before.</p>
{{/if}}<p style="color: #6c757d;">Alerta Notifications</p>
</body>
</html>
"#;

const ALERT_ROW_TEMPLATE: &str = r#"<tr style="border-left: 6px solid {{severity_color severity}};"><td><b><code>{{event}}</code></b></td><td><a href="{{url}}">{{resource}}</a></td><td style="color: {{severity_color severity}};">{{severity}}</td><td>{{environment}}</td><td>{{text}}</td></tr>"#;

handlebars_helper!(severity_color_helper: |severity: String| severity_color(&severity));

#[derive(Serialize)]
struct MailContext<'a, E: Serialize> {
    subject: String,
    closed: bool,
    #[serde(flatten)]
    event: &'a E,
}

/// Compiled body template of one mail channel
pub struct MailTemplates {
    registry: Handlebars<'static>,
}

impl MailTemplates {
    /// Compile `custom`, or the built-in template when none is given
    pub fn new(custom: Option<&str>) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("severity_color", Box::new(severity_color_helper));

        registry
            .register_template_string(ALERT_ROW, ALERT_ROW_TEMPLATE)
            .map_err(|e| NotifierError::Config(format!("Invalid alert row template: {}", e)))?;
        registry
            .register_template_string(BODY, custom.unwrap_or(DEFAULT_TEMPLATE))
            .map_err(|e| NotifierError::Config(format!("Invalid mail template: {}", e)))?;

        Ok(Self { registry })
    }

    /// Render the body announcing newly opened alerts
    pub fn render_open(&self, event: &OpenAlertsEvent) -> Result<String> {
        self.render(&MailContext {
            subject: event.subject(),
            closed: false,
            event,
        })
    }

    /// Render the body announcing closed alerts
    pub fn render_closed(&self, event: &ClosedAlertsEvent) -> Result<String> {
        self.render(&MailContext {
            subject: event.subject(),
            closed: true,
            event,
        })
    }

    fn render<E: Serialize>(&self, context: &MailContext<'_, E>) -> Result<String> {
        self.registry
            .render(BODY, context)
            .map_err(|e| NotifierError::Email(format!("Failed to render mail body: {}", e)))
    }
}
