//! Menu loops and their handlers.

use std::io::{BufRead, Write};

use anyhow::Result;
use minimail_core::mail::{self, Delivery, DraftCommand, DraftOutcome};
use minimail_core::{Mailbox, Session, validate_username};
use tracing::info;

use crate::console::{Console, input_closed};
use crate::render;

/// What the caller of a menu should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Return to the main menu without exiting.
    SwitchUser,
    /// Save everything and stop.
    Quit,
}

/// Runs the program until the user exits or input ends, then saves.
pub fn run<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>) -> Result<()> {
    console.say(render::welcome("WELCOME TO MINIMAIL+"))?;

    match main_menu(session, console) {
        Ok(()) => {}
        Err(e) if input_closed(&e) => info!("Input closed, saving before exit"),
        Err(e) => return Err(e),
    }

    session.save()?;
    console.say("\nAll data saved. Goodbye!")?;
    Ok(())
}

fn main_menu<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    loop {
        console.say("\nMain Menu")?;
        console.say("1. Login")?;
        console.say("2. Register New User")?;
        console.say("3. Exit")?;
        console.say(render::separator())?;

        match console.prompt("Enter choice (1-3): ")?.as_str() {
            "1" => {
                if let Some(user) = login(session, console)?
                    && user_menu(session, console, &user)? == Flow::Quit
                {
                    return Ok(());
                }
            }
            "2" => register(session, console)?,
            "3" => return Ok(()),
            _ => console.say("Invalid choice. Try again.")?,
        }
    }
}

fn user_menu<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<Flow> {
    loop {
        console.banner(&format!("Welcome, {user}!"))?;
        console.say("1. View Inbox")?;
        console.say("2. Compose Email")?;
        console.say("3. View Drafts")?;
        console.say("4. View Sent Mails")?;
        console.say("5. Delete Email")?;
        console.say("6. Search Emails")?;
        console.say("7. Change Password")?;
        console.say("8. Switch User")?;
        console.say("9. Exit")?;
        console.say(render::separator())?;

        match console.prompt("Enter choice (1-9): ")?.as_str() {
            "1" => view_inbox(session, console, user)?,
            "2" => compose(session, console, user)?,
            "3" => view_drafts(session, console, user)?,
            "4" => view_sent(session, console, user)?,
            "5" => delete(session, console, user)?,
            "6" => search(session, console, user)?,
            "7" => change_password(session, console, user)?,
            "8" => return Ok(Flow::SwitchUser),
            "9" => return Ok(Flow::Quit),
            _ => console.say("Invalid choice. Try again.")?,
        }
    }
}

fn login<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Option<String>> {
    console.banner("LOGIN")?;
    let user = session.login(console)?;
    match &user {
        Some(user) => {
            console.say(format_args!("Login successful. Welcome, {user}!"))?;
            let unread = session
                .mailboxes()
                .get(user)
                .map_or(0, Mailbox::unread_count);
            if unread > 0 {
                console.say(format_args!("You have {unread} new message(s)."))?;
            }
        }
        None => console.say("Maximum login attempts reached. Returning to the main menu.")?,
    }
    Ok(user)
}

fn register<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.banner("USER REGISTRATION")?;

    let username = loop {
        let username = console.prompt("Choose a username: ")?;
        if let Err(e) = validate_username(&username) {
            console.say(format_args!("{e}. Try a different one."))?;
        } else if session.accounts().contains(&username) {
            console.say("Username already exists. Try a different one.")?;
        } else {
            break username;
        }
    };

    let password = console.prompt("Choose a password: ")?;
    session.register(&username, &password)?;
    console.say(format_args!("User '{username}' registered successfully!\n"))?;
    Ok(())
}

fn change_password<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    console.banner("CHANGE PASSWORD")?;

    let old = console.prompt("Enter your current password: ")?;
    if !session.accounts().verify(user, &old) {
        console.say("Incorrect password.")?;
        return Ok(());
    }

    let new = console.prompt("Enter your new password: ")?;
    match session.change_password(user, &old, &new) {
        Ok(()) => console.say("Password updated successfully.")?,
        Err(e) if e.is_recoverable() => console.say(e)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn view_inbox<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    let entries = mail::list_inbox(session.mailboxes_mut(), user);
    if entries.is_empty() {
        console.say("\nYour inbox is empty.")?;
        return Ok(());
    }

    console.banner(&format!("{}'S INBOX", user.to_uppercase()))?;
    for entry in &entries {
        console.say(render::inbox_entry(entry))?;
    }
    Ok(())
}

fn compose<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    console.banner("COMPOSE EMAIL")?;

    let recipients = console.prompt("Recipients (comma separated): ")?;
    let subject = console.prompt("Subject: ")?;
    let body = console.prompt("Message:\n")?;
    let action = console.prompt("Send now or save as draft? (send/draft): ")?;

    let composition = mail::compose(user, &recipients, &subject, &body, &action);
    match mail::send(session.mailboxes_mut(), composition) {
        Ok(Delivery::Sent(to)) => console.say(format_args!("\nEmail sent to: {}", to.join(", ")))?,
        Ok(Delivery::Drafted) => console.say("Email saved to drafts.")?,
        Err(e) => console.say(e)?,
    }
    Ok(())
}

fn view_drafts<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    let drafts = mail::list_drafts(session.mailboxes_mut(), user);
    if drafts.is_empty() {
        console.say("\nNo drafts saved.")?;
        return Ok(());
    }

    console.banner(&format!("{}'S DRAFTS", user.to_uppercase()))?;
    for (position, draft) in drafts.iter().enumerate() {
        console.say(render::outgoing(position, draft))?;
    }

    let choice = console.prompt("Send or delete a draft? (send <index> / del <index> / cancel): ")?;
    let outcome = DraftCommand::parse(&choice)
        .and_then(|command| mail::act_on_draft(session.mailboxes_mut(), user, command));
    match outcome {
        Ok(DraftOutcome::Sent(_)) => console.say("Draft sent successfully!")?,
        Ok(DraftOutcome::Deleted(_)) => console.say("Draft deleted.")?,
        Ok(DraftOutcome::Cancelled) => console.say("Cancelled.")?,
        Err(e) => console.say(e)?,
    }
    Ok(())
}

fn view_sent<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    let sent = mail::list_sent(session.mailboxes_mut(), user);
    if sent.is_empty() {
        console.say("\nNo sent messages.")?;
        return Ok(());
    }

    console.banner(&format!("{}'S SENT MAILS", user.to_uppercase()))?;
    for (position, message) in sent.iter().enumerate() {
        console.say(render::outgoing(position, message))?;
    }
    Ok(())
}

fn delete<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    if session.mailboxes_mut().ensure(user).inbox.is_empty() {
        console.say("\nNo emails to delete.")?;
        return Ok(());
    }

    view_inbox(session, console, user)?;
    let input = console.prompt("Enter the index of the message to delete: ")?;
    let deleted = mail::parse_index(&input)
        .and_then(|index| mail::delete(session.mailboxes_mut(), user, index));
    match deleted {
        Ok(message) => console.say(format_args!("Deleted message from {}", message.sender))?,
        Err(e) => console.say(e)?,
    }
    Ok(())
}

fn search<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    user: &str,
) -> Result<()> {
    let keyword = console.prompt("\nKeyword to search in subject/body: ")?;
    let hits = mail::search(session.mailboxes_mut(), user, &keyword);
    if hits.is_empty() {
        console.say("No matching emails found.")?;
        return Ok(());
    }

    console.banner("SEARCH RESULTS")?;
    for hit in &hits {
        console.say(render::search_hit(hit))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimail_core::Config;
    use tempfile::TempDir;

    use super::*;

    /// Runs a full program over scripted input and returns its output.
    ///
    /// Each step is the input for one menu action.
    fn run_script(dir: &TempDir, steps: &[&[&str]]) -> String {
        let mut session = Session::open(Config::with_data_dir(dir.path())).unwrap();
        let input = steps
            .iter()
            .flat_map(|step| step.iter())
            .map(|line| format!("{line}\n"))
            .collect::<String>();
        let mut console = Console::new(input.as_bytes(), Vec::new());
        run(&mut session, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn reopen(dir: &TempDir) -> Session {
        Session::open(Config::with_data_dir(dir.path())).unwrap()
    }

    #[test]
    fn register_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(&dir, &[&["2", "alice", "pw"], &["3"]]);
        assert!(out.contains("WELCOME TO MINIMAIL+"));
        assert!(out.contains("User 'alice' registered successfully!"));
        assert!(out.contains("All data saved. Goodbye!"));
        assert!(reopen(&dir).accounts().verify("alice", "pw"));
    }

    #[test]
    fn duplicate_and_empty_usernames_reprompt() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "pw"],
                &["2", "alice", "", "bob", "pw2"],
                &["3"],
            ],
        );
        assert!(out.contains("Username already exists. Try a different one."));
        assert!(out.contains("Username cannot be empty. Try a different one."));
        let session = reopen(&dir);
        assert!(session.accounts().verify("alice", "pw"));
        assert!(session.accounts().verify("bob", "pw2"));
        assert_eq!(session.accounts().len(), 2);
    }

    #[test]
    fn three_failed_logins_return_to_main_menu() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "pw"],
                &["1", "ghost", "alice", "x", "alice", "y"],
                &["3"],
            ],
        );
        assert!(out.contains("User 'ghost' does not exist. Try again."));
        assert_eq!(out.matches("Incorrect password. Try again.").count(), 2);
        assert!(out.contains("Maximum login attempts reached."));
        assert!(!out.contains("Login successful"));
    }

    #[test]
    fn send_then_switch_user_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "a"],
                &["2", "bob", "b"],
                &["1", "alice", "a"],
                &["2", "bob, carol", "Lunch", "Noon", "SEND"],
                &["4"],
                &["8"],
                &["1", "bob", "b"],
                &["1"],
                &["1"],
                &["9"],
            ],
        );
        assert!(out.contains("Email sent to: bob, carol"));
        assert!(out.contains("ALICE'S SENT MAILS"));
        assert!(out.contains("[0] To: bob, carol"));
        assert!(out.contains("You have 1 new message(s)."));
        assert!(out.contains("BOB'S INBOX"));
        assert_eq!(out.matches("[NEW] From: alice").count(), 1);
        assert!(out.contains("[0] From: alice"));

        let session = reopen(&dir);
        let boxes = session.mailboxes();
        assert!(boxes.get("bob").unwrap().inbox[0].read);
        assert!(!boxes.get("carol").unwrap().inbox[0].read);
        assert_eq!(boxes.get("alice").unwrap().sent.len(), 1);
    }

    #[test]
    fn invalid_compose_action() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "a"],
                &["1", "alice", "a"],
                &["2", "bob", "s", "b", "later"],
                &["9"],
            ],
        );
        assert!(out.contains("Invalid option 'later'. Email not sent."));
        assert!(reopen(&dir).mailboxes().get("bob").is_none());
    }

    #[test]
    fn draft_then_send_from_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "a"],
                &["1", "alice", "a"],
                &["2", "bob", "Draft", "Body", "draft"],
                &["3", "send 5"],
                &["3", "send 0"],
                &["3"],
                &["9"],
            ],
        );
        assert!(out.contains("Email saved to drafts."));
        assert!(out.contains("Invalid index 5: folder holds 1 message(s)"));
        assert!(out.contains("Draft sent successfully!"));
        assert!(out.contains("No drafts saved."));

        let session = reopen(&dir);
        assert_eq!(session.mailboxes().get("bob").unwrap().inbox.len(), 1);
        assert_eq!(session.mailboxes().get("alice").unwrap().sent.len(), 1);
    }

    #[test]
    fn delete_and_search() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "a"],
                &["1", "alice", "a"],
                &["5"],
                &["2", "alice", "Note to self", "remember milk", "send"],
                &["6", "MILK"],
                &["6", "bread"],
                &["5", "x"],
                &["5", "0"],
                &["9"],
            ],
        );
        assert!(out.contains("No emails to delete."));
        assert!(out.contains("SEARCH RESULTS"));
        assert!(out.contains("No matching emails found."));
        assert!(out.contains("Please enter a valid number (got 'x')"));
        assert!(out.contains("Deleted message from alice"));
        assert!(reopen(&dir).mailboxes().get("alice").unwrap().inbox.is_empty());
    }

    #[test]
    fn change_password_flow() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "old"],
                &["1", "alice", "old"],
                &["7", "wrong"],
                &["7", "old", "new"],
                &["9"],
            ],
        );
        assert!(out.contains("Incorrect password."));
        assert!(out.contains("Password updated successfully."));
        assert!(reopen(&dir).accounts().verify("alice", "new"));
    }

    #[test]
    fn invalid_choices() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["7"],
                &["2", "alice", "a"],
                &["1", "alice", "a"],
                &["0"],
                &["9"],
            ],
        );
        assert_eq!(out.matches("Invalid choice. Try again.").count(), 2);
    }

    #[test]
    fn end_of_input_saves() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &dir,
            &[
                &["2", "alice", "a"],
                &["1", "alice", "a"],
                &["2", "alice", "s", "b", "draft"],
            ],
        );
        assert!(out.contains("All data saved. Goodbye!"));
        assert_eq!(reopen(&dir).mailboxes().get("alice").unwrap().drafts.len(), 1);
    }
}
