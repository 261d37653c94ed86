//! Replays a CSV script of commands against a [`PaymentGateway`].

use super::csv::authorization_writer::AuthorizationWriter;
use super::csv::command_reader::{Command, CommandReader, CommandType};
use crate::application::gateway::PaymentGateway;
use crate::error::{PaymentError, Result};
use std::collections::HashMap;
use std::io::{Read, Write};
use tracing::{info, warn};

/// Maps script references to gateway identifiers, remembering creation order.
#[derive(Default)]
pub struct BatchRunner {
    ids: HashMap<String, String>,
    order: Vec<String>,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes every command from `source`.
    ///
    /// Unreadable lines and rejected commands are logged and skipped; they never stop
    /// the batch.
    pub async fn run<R: Read>(&mut self, gateway: &PaymentGateway, source: R) -> Result<()> {
        for (line, command) in CommandReader::new(source).commands().enumerate() {
            match command {
                Ok(command) => {
                    if let Err(err) = self.apply(gateway, &command).await {
                        warn!(line = line + 2, reference = %command.auth, %err, "Error processing command");
                    }
                }
                Err(err) => {
                    warn!(line = line + 2, %err, "Error reading command");
                }
            }
        }
        Ok(())
    }

    async fn apply(&mut self, gateway: &PaymentGateway, command: &Command) -> Result<()> {
        match command.r#type {
            CommandType::Authorize => {
                if self.ids.contains_key(&command.auth) {
                    return Err(PaymentError::MalformedRequest(format!(
                        "reference '{}' already authorized",
                        command.auth
                    )));
                }
                let authorization = gateway.authorize(&command.to_request_body()?).await?;
                info!(reference = %command.auth, id = authorization.id(), "authorized");
                self.ids
                    .insert(command.auth.clone(), authorization.id().to_string());
                self.order.push(command.auth.clone());
            }
            CommandType::Capture => {
                let id = self.resolve(&command.auth)?;
                gateway.capture(id, command.required_amount()?).await?;
            }
            CommandType::Refund => {
                let id = self.resolve(&command.auth)?;
                gateway.refund(id, command.required_amount()?).await?;
            }
            CommandType::Void => {
                let id = self.resolve(&command.auth)?;
                gateway.void(id).await?;
            }
        }
        Ok(())
    }

    fn resolve(&self, reference: &str) -> Result<&str> {
        self.ids
            .get(reference)
            .map(String::as_str)
            .ok_or_else(|| PaymentError::UnknownAuthorization(reference.to_string()))
    }

    /// Identifier generated for `reference`, if it was authorized.
    pub fn id_of(&self, reference: &str) -> Option<&str> {
        self.ids.get(reference).map(String::as_str)
    }

    /// Writes the final state of every authorized reference, in script order.
    pub async fn report<W: Write>(&self, gateway: &PaymentGateway, sink: W) -> Result<()> {
        let mut summaries = Vec::with_capacity(self.order.len());
        for reference in &self.order {
            let id = self.resolve(reference)?;
            summaries.push((reference.as_str(), gateway.summary(id).await?));
        }

        AuthorizationWriter::new(sink)
            .write_authorizations(summaries.iter().map(|(r, s)| (*r, s)))
    }
}
