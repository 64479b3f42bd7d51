//! Client Management Use Cases

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::entity::Client;
use crate::domain::repository::ClientRepository;
use crate::error::{LogisticsError, LogisticsResult};
use kernel::id::ClientId;

/// Fields accepted when registering a client
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub total_spent: Option<Decimal>,
    pub notes: Option<String>,
}

pub struct ClientService<C> {
    clients: Arc<C>,
}

impl<C> Clone for ClientService<C> {
    fn clone(&self) -> Self {
        Self {
            clients: Arc::clone(&self.clients),
        }
    }
}

impl<C: ClientRepository> ClientService<C> {
    pub fn new(clients: Arc<C>) -> Self {
        Self { clients }
    }

    pub async fn create(&self, input: NewClient) -> LogisticsResult<Client> {
        if input.name.trim().is_empty() {
            return Err(LogisticsError::Validation(
                "Client name is required".to_string(),
            ));
        }

        let mut client = Client::new(input.name.trim().to_string());
        client.email = input.email;
        client.phone = input.phone;
        client.address = input.address;
        client.join_date = input.join_date;
        client.notes = input.notes;

        self.clients.create(&client).await?;
        Ok(client)
    }

    pub async fn get(&self, client_id: &ClientId) -> LogisticsResult<Client> {
        self.clients
            .find_by_id(client_id)
            .await?
            .ok_or(LogisticsError::NotFound("client"))
    }

    pub async fn list(&self) -> LogisticsResult<Vec<Client>> {
        self.clients.list().await
    }

    pub async fn update(
        &self,
        client_id: &ClientId,
        patch: ClientPatch,
    ) -> LogisticsResult<Client> {
        let mut client = self.get(client_id).await?;

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(LogisticsError::Validation(
                    "Client name is required".to_string(),
                ));
            }
            client.name = name.trim().to_string();
        }
        if let Some(email) = patch.email {
            client.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            client.phone = Some(phone);
        }
        if let Some(address) = patch.address {
            client.address = Some(address);
        }
        if let Some(join_date) = patch.join_date {
            client.join_date = Some(join_date);
        }
        if let Some(total_spent) = patch.total_spent {
            client.total_spent = total_spent;
        }
        if let Some(notes) = patch.notes {
            client.notes = Some(notes);
        }
        client.touch();

        self.clients.update(&client).await?;
        Ok(client)
    }

    pub async fn delete(&self, client_id: &ClientId) -> LogisticsResult<()> {
        self.get(client_id).await?;
        self.clients.delete(client_id).await
    }
}
