//! Program-wide state.

use tracing::info;

use crate::account::{AccountStore, LoginPrompt};
use crate::config::Config;
use crate::mailbox::MailboxStore;
use crate::{Result, storage};

/// Owns the account and mailbox stores for the lifetime of the program.
///
/// The account file is written as soon as an account changes; the mailbox
/// file is only written by [`Session::save`].
#[derive(Debug)]
pub struct Session {
    config: Config,
    accounts: AccountStore,
    mailboxes: MailboxStore,
}

impl Session {
    /// Loads both stores from the configured data directory.
    ///
    /// Missing files start as empty stores.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn open(config: Config) -> Result<Self> {
        let accounts: AccountStore = storage::load(&config.users_path())?;
        let mailboxes: MailboxStore = storage::load(&config.inboxes_path())?;
        info!(
            "Loaded {} account(s) and {} mailbox(es) from {}",
            accounts.len(),
            mailboxes.len(),
            config.data_dir.display()
        );

        Ok(Self {
            config,
            accounts,
            mailboxes,
        })
    }

    /// The account store.
    #[must_use]
    pub const fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// The mailbox store.
    #[must_use]
    pub const fn mailboxes(&self) -> &MailboxStore {
        &self.mailboxes
    }

    /// Mutable access to the mailbox store.
    pub const fn mailboxes_mut(&mut self) -> &mut MailboxStore {
        &mut self.mailboxes
    }

    /// Registers an account and writes the account file.
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`crate::AccountError`] if the username is taken
    /// or invalid, or a fatal error if the file cannot be written.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        self.accounts.register(username, password)?;
        self.save_accounts()
    }

    /// Runs an interactive login and makes sure the user has a mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error only if the prompt fails.
    pub fn login(&mut self, prompt: &mut impl LoginPrompt) -> Result<Option<String>> {
        let user = self
            .accounts
            .authenticate(self.config.max_login_attempts, prompt)?;
        if let Some(username) = &user {
            self.mailboxes.ensure(username);
        }
        Ok(user)
    }

    /// Changes a password and writes the account file.
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`crate::AccountError::WrongPassword`] if `old`
    /// does not match, or a fatal error if the file cannot be written.
    pub fn change_password(&mut self, username: &str, old: &str, new: &str) -> Result<()> {
        self.accounts.change_password(username, old, new)?;
        self.save_accounts()
    }

    /// Writes both stores in full.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save(&self) -> Result<()> {
        storage::save(&self.config.inboxes_path(), &self.mailboxes)?;
        self.save_accounts()?;
        info!("All data saved to {}", self.config.data_dir.display());
        Ok(())
    }

    fn save_accounts(&self) -> Result<()> {
        storage::save(&self.config.users_path(), &self.accounts)
    }
}
