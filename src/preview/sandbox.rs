//! Builds the isolated document rendered inside the preview frame.
//!
//! The frame always runs with `allow-scripts` and never with
//! `allow-same-origin`, so the only path back to the host is the one-way
//! `postMessage` bridge injected here.

use std::fmt::Write as _;

use crate::event::events::SANDBOX_MESSAGE_SOURCE;

const HIDE_SCROLLBARS_STYLE: &str = "<style data-aime-preview>\
html,body{scrollbar-width:none;-ms-overflow-style:none}\
html::-webkit-scrollbar,body::-webkit-scrollbar{display:none}\
</style>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SandboxPolicy {
    pub allow_forms: bool,
    pub allow_popups: bool,
    pub allow_modals: bool,
}

impl SandboxPolicy {
    /// Value of the frame's `sandbox` attribute.
    pub fn attribute(&self) -> String {
        let mut tokens = vec!["allow-scripts"];
        if self.allow_forms {
            tokens.push("allow-forms");
        }
        if self.allow_popups {
            tokens.push("allow-popups");
        }
        if self.allow_modals {
            tokens.push("allow-modals");
        }
        tokens.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxDocument {
    pub html: String,
    pub render_key: u64,
    pub sandbox: String,
}

fn bridge_script(render_key: u64) -> String {
    let mut script = String::new();
    let _ = write!(
        script,
        r#"<script data-aime-preview>(function(){{
var key={render_key};
function report(message){{
try{{parent.postMessage(JSON.stringify({{source:"{source}",renderKey:key,kind:"error",message:String(message)}}),"*");}}catch(_){{}}
}}
window.onerror=function(message,source,line,column){{report(line?message+" (line "+line+":"+column+")":message);return false;}};
window.addEventListener("unhandledrejection",function(event){{var r=event.reason;report("Unhandled rejection: "+(r&&r.message?r.message:r));}});
var original=console.error;
console.error=function(){{report(Array.prototype.map.call(arguments,String).join(" "));return original.apply(console,arguments);}};
}})();</script>"#,
        source = SANDBOX_MESSAGE_SOURCE,
    );
    script
}

/// Byte offset just past the opening `<name ...>` tag, case-insensitive.
fn after_open_tag(lower: &str, name: &str) -> Option<usize> {
    let needle = format!("<{name}");
    lower.match_indices(&needle).find_map(|(at, _)| {
        let rest = &lower[at + needle.len()..];
        let boundary = rest.chars().next()?;
        if boundary != '>' && !boundary.is_whitespace() {
            return None;
        }
        rest.find('>').map(|close| at + needle.len() + close + 1)
    })
}

/// Injects the scrollbar style and the error bridge ahead of any author
/// script: inside `<head>` when present, else after `<html>`, else first.
pub fn build_document(
    content: &str,
    render_key: u64,
    hide_scrollbars: bool,
    policy: &SandboxPolicy,
) -> SandboxDocument {
    let mut injected = String::new();
    if hide_scrollbars {
        injected.push_str(HIDE_SCROLLBARS_STYLE);
    }
    injected.push_str(&bridge_script(render_key));

    let lower = content.to_ascii_lowercase();
    let at = after_open_tag(&lower, "head")
        .or_else(|| after_open_tag(&lower, "html"))
        .unwrap_or(0);

    let mut html = String::with_capacity(content.len() + injected.len());
    html.push_str(&content[..at]);
    html.push_str(&injected);
    html.push_str(&content[at..]);

    SandboxDocument {
        html,
        render_key,
        sandbox: policy.attribute(),
    }
}
