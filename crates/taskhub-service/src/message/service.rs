//! Direct messages between users of the same company.
//!
//! Messaging is deliberately not audited in the activity trail.

use std::sync::Arc;

use chrono::Utc;

use taskhub_core::types::{MessageId, UserId};
use taskhub_core::{AppError, AppResult};
use taskhub_database::{MessageStore, UserStore};
use taskhub_entity::message::{Message, NewMessage};

use crate::context::ActorContext;

/// Handles direct messages.
#[derive(Clone)]
pub struct MessageService {
    /// Message persistence.
    store: Arc<dyn MessageStore>,
    /// Receiver lookups.
    users: Arc<dyn UserStore>,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(store: Arc<dyn MessageStore>, users: Arc<dyn UserStore>) -> Self {
        Self { store, users }
    }

    /// Sends a message from the caller to another user in the same
    /// company.
    pub async fn send(&self, ctx: &ActorContext, req: NewMessage) -> AppResult<Message> {
        if req.content.trim().is_empty() {
            return Err(AppError::validation("Message content cannot be empty"));
        }

        let receiver = self
            .users
            .find_by_id(req.receiver_id)
            .await?
            .ok_or_else(|| AppError::not_found("Receiver not found"))?;
        if receiver.company_id.unwrap_or(receiver.id) != ctx.tenant_id {
            return Err(AppError::authorization(
                "Receiver does not belong to this company",
            ));
        }

        let message = Message {
            id: MessageId::new(),
            sender_id: ctx.user_id,
            receiver_id: req.receiver_id,
            content: req.content,
            company_id: ctx.tenant_id,
            created_at: Utc::now(),
        };
        self.store.insert(&message).await
    }

    /// Lists the caller's messages exchanged with anyone, newest first.
    pub async fn list_for_caller(&self, ctx: &ActorContext) -> AppResult<Vec<Message>> {
        self.store.list_for_user(ctx.tenant_id, ctx.user_id).await
    }

    /// Lists another user's conversation within the caller's company.
    pub async fn list_for_user(&self, ctx: &ActorContext, user_id: UserId) -> AppResult<Vec<Message>> {
        self.store.list_for_user(ctx.tenant_id, user_id).await
    }

    /// Deletes a message the caller sent.
    pub async fn delete(&self, ctx: &ActorContext, id: MessageId) -> AppResult<()> {
        let message = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))?;
        if message.company_id != ctx.tenant_id {
            return Err(AppError::authorization(
                "You do not have access to this message",
            ));
        }
        if message.sender_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::authorization(
                "Only the sender can delete a message",
            ));
        }

        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Message not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryMessageStore, MemoryUserStore, make_user};
    use taskhub_core::error::ErrorKind;
    use taskhub_entity::user::UserRole;

    struct Fixture {
        users: Arc<MemoryUserStore>,
        service: MessageService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserStore::new());
        let service = MessageService::new(Arc::new(MemoryMessageStore::new()), users.clone());
        Fixture { users, service }
    }

    #[tokio::test]
    async fn test_send_and_list_newest_first() {
        let f = fixture();
        let admin = make_user(UserRole::Admin, None);
        let employee = make_user(UserRole::Employee, Some(admin.id));
        f.users.insert(&admin).await.unwrap();
        f.users.insert(&employee).await.unwrap();
        let ctx = ActorContext::new(admin.id, admin.role, admin.company_id);

        for text in ["first", "second"] {
            f.service
                .send(&ctx, NewMessage {
                    receiver_id: employee.id,
                    content: text.to_string(),
                })
                .await
                .unwrap();
        }

        let inbox = f.service.list_for_user(&ctx, employee.id).await.unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].content, "second");
        assert_eq!(inbox[1].content, "first");
    }

    #[tokio::test]
    async fn test_cannot_message_across_companies() {
        let f = fixture();
        let admin = make_user(UserRole::Admin, None);
        let outsider = make_user(UserRole::Admin, None);
        f.users.insert(&admin).await.unwrap();
        f.users.insert(&outsider).await.unwrap();
        let ctx = ActorContext::new(admin.id, admin.role, admin.company_id);

        let err = f
            .service
            .send(&ctx, NewMessage {
                receiver_id: outsider.id,
                content: "hello?".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_only_sender_or_admin_deletes() {
        let f = fixture();
        let admin = make_user(UserRole::Admin, None);
        let employee = make_user(UserRole::Employee, Some(admin.id));
        let other = make_user(UserRole::Employee, Some(admin.id));
        f.users.insert(&admin).await.unwrap();
        f.users.insert(&employee).await.unwrap();
        f.users.insert(&other).await.unwrap();
        let employee_ctx = ActorContext::new(employee.id, employee.role, employee.company_id);
        let other_ctx = ActorContext::new(other.id, other.role, other.company_id);

        let message = f
            .service
            .send(&employee_ctx, NewMessage {
                receiver_id: other.id,
                content: "for your eyes".to_string(),
            })
            .await
            .unwrap();

        let err = f.service.delete(&other_ctx, message.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        f.service.delete(&employee_ctx, message.id).await.unwrap();

        let err = f.service.delete(&employee_ctx, message.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
