#[macro_export]
macro_rules! impl_store_client_methods {
    ($client_name:ident, $record:ty, $collection:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self, items), fields(count = items.len()))]
                pub async fn [<set_ $collection>](&self, items: Vec<$record>) -> Result<(), $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.set(items).await.map_err(|e| $crate::error::StoreError::ActorCommunicationError(e.to_string()))
                }

                #[tracing::instrument(skip(self))]
                pub async fn set_loading(&self, loading: bool) -> Result<(), $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.set_loading(loading).await.map_err(|e| $crate::error::StoreError::ActorCommunicationError(e.to_string()))
                }

                #[tracing::instrument(skip(self))]
                pub async fn set_error(&self, error: Option<String>) -> Result<(), $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.set_error(error).await.map_err(|e| $crate::error::StoreError::ActorCommunicationError(e.to_string()))
                }

                #[tracing::instrument(skip(self))]
                pub async fn begin_fetch(&self) -> Result<$crate::actor_framework::FetchToken, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.begin_fetch().await.map_err(|e| $crate::error::StoreError::ActorCommunicationError(e.to_string()))
                }

                #[tracing::instrument(skip(self, outcome), fields(ok = outcome.is_ok()))]
                pub async fn finish_fetch(
                    &self,
                    token: $crate::actor_framework::FetchToken,
                    outcome: Result<Vec<$record>, String>,
                ) -> Result<bool, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.finish_fetch(token, outcome).await.map_err(|e| $crate::error::StoreError::ActorCommunicationError(e.to_string()))
                }

                #[tracing::instrument(skip(self))]
                pub async fn snapshot(&self) -> Result<$crate::actor_framework::StoreSnapshot<$record>, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.snapshot().await.map_err(|e| $crate::error::StoreError::ActorCommunicationError(e.to_string()))
                }

                pub fn subscribe(&self) -> tokio::sync::watch::Receiver<$crate::actor_framework::StoreSnapshot<$record>> {
                    self.inner.subscribe()
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_store_client_new {
    ($client_name:ident, $record:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::StoreClient<$record>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_store_client {
    ($client_name:ident, $record:ty, $collection:ident) => {
        impl_store_client_new!($client_name, $record);
        impl_store_client_methods!($client_name, $record, $collection);
    };
}
