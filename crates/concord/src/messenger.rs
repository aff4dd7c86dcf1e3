//! Resolving messages and handing them to whoever delivers them.

use std::future::Future;

use concord_message::{
    Argument, Eagerness, Notification, NotifySettings, RenderContext, ResolvedMessage, Translation,
    Translator,
};
use concord_protocol::{Codec, JsonCodec};
use concord_transport::Connection;

use crate::ConcordError;

/// Something that can carry a resolved message to its recipient.
///
/// Concord decides what a message looks like; the embedding server decides
/// how it travels. The returned future is `Send`, so sends can be spawned
/// onto the runtime.
pub trait Delivery: Send + Sync {
    fn deliver(
        &self,
        message: &ResolvedMessage,
    ) -> impl Future<Output = Result<(), ConcordError>> + Send;
}

/// Delivers messages over a [`Connection`], encoded with a [`Codec`].
///
/// With the default [`JsonCodec`] each message is one frame of chat
/// component JSON.
pub struct ConnectionDelivery<C, K = JsonCodec> {
    conn: C,
    codec: K,
}

impl<C> ConnectionDelivery<C>
where
    C: Connection,
    ConcordError: From<C::Error>,
{
    pub fn new(conn: C) -> Self {
        Self::with_codec(conn, JsonCodec)
    }
}

impl<C, K> ConnectionDelivery<C, K>
where
    C: Connection,
    ConcordError: From<C::Error>,
    K: Codec,
{
    pub fn with_codec(conn: C, codec: K) -> Self {
        Self { conn, codec }
    }

    /// The render context for this connection's player.
    pub fn context(&self) -> RenderContext {
        RenderContext::player(self.conn.id())
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }
}

impl<C, K> Delivery for ConnectionDelivery<C, K>
where
    C: Connection,
    ConcordError: From<C::Error>,
    K: Codec,
{
    async fn deliver(&self, message: &ResolvedMessage) -> Result<(), ConcordError> {
        let bytes = self.codec.encode(&message.component)?;
        self.conn.send(&bytes).await?;
        tracing::trace!(conn_id = %self.conn.id(), eagerness = %message.eagerness, "message delivered");
        Ok(())
    }
}

/// Resolves and sends messages on behalf of the server.
///
/// Cheap to clone; every clone shares the server's feature registry.
#[derive(Debug, Clone)]
pub struct Messenger {
    translator: Translator,
    notify: NotifySettings,
}

impl Messenger {
    pub(crate) fn new(translator: Translator, notify: NotifySettings) -> Self {
        Self { translator, notify }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Resolves `translation` for `context` without sending it.
    pub fn resolve(
        &self,
        translation: &Translation,
        args: Vec<Argument>,
        context: &RenderContext,
    ) -> ResolvedMessage {
        self.translator.resolve(translation, args, context)
    }

    /// Resolves `translation` for `context` and hands it to `delivery`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the delivery reports.
    pub async fn send<D: Delivery>(
        &self,
        delivery: &D,
        translation: &Translation,
        args: Vec<Argument>,
        context: &RenderContext,
    ) -> Result<ResolvedMessage, ConcordError> {
        let message = self.resolve(translation, args, context);
        delivery.deliver(&message).await?;
        Ok(message)
    }

    /// Announces a game event through `delivery`, usually the chat channel.
    ///
    /// Notifications always resolve eagerly: the chat side has no use for
    /// translation keys. Returns `Ok(false)` without delivering anything
    /// when the notification is switched off.
    ///
    /// # Errors
    ///
    /// Returns whatever error the delivery reports.
    pub async fn notify<D: Delivery>(
        &self,
        kind: Notification,
        args: Vec<Argument>,
        delivery: &D,
    ) -> Result<bool, ConcordError> {
        let Some(translation) = kind.message(&self.notify) else {
            tracing::trace!(?kind, "notification disabled");
            return Ok(false);
        };
        let message = self.translator.render(translation, args, Eagerness::Eager);
        delivery.deliver(&message).await?;
        tracing::debug!(?kind, "notification sent");
        Ok(true)
    }
}
