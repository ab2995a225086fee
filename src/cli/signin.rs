//! Sign-in redirect inspection
//!
//! Prints where the sign-in page or modal would send the browser for the
//! board's configured site.

use anyhow::Result;

use super::output::Output;
use crate::domain::signin::{self, AfterSignIn, SignInContext, SignInNotice};
use crate::storage::Board;

pub fn run(output: &Output, current_url: Option<&str>, modal: bool) -> Result<()> {
    let board = Board::open_current()?;
    let site = &board.config().board.site;

    let context = if modal { SignInContext::Modal } else { SignInContext::Page };
    let current = current_url
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}/signin", site.base_url));
    output.verbose_ctx("signin-url", &format!("context={:?}, url={}", context, current));

    let return_to = signin::return_url(site, context, &current)?;
    let auto = signin::auto_redirect(site, &return_to)?;
    let after = signin::after_sign_in(site, context, &current)?;
    let notice = (context == SignInContext::Page).then(|| SignInNotice::for_site(site));

    if output.is_json() {
        output.data(&serde_json::json!({
            "returnTo": return_to,
            "autoRedirect": auto,
            "afterSignIn": after,
            "notice": notice,
        }));
        return Ok(());
    }

    match &auto {
        Some(url) => println!("Auto-redirect: {}", url),
        None => println!("Auto-redirect: none (sign-in form shown)"),
    }
    match &after {
        AfterSignIn::Reload => println!("After sign-in: reload {}", current),
        AfterSignIn::Navigate(url) => println!("After sign-in: navigate to {}", url),
    }
    if let Some(notice) = notice {
        println!();
        println!("{}", notice.title(&site.tenant_name));
        println!("{}", notice.text());
    }

    Ok(())
}
