//! Authentication state trait and macro.

use crate::jwt::TokenCodec;

/// Trait for state types that can verify session tokens.
pub trait HasAuthState {
    fn codec(&self) -> &TokenCodec;
    fn secure_cookies(&self) -> bool;
}

/// Macro to implement `HasAuthState` for state structs with the standard fields.
///
/// The struct must have these fields:
/// - `codec: Arc<TokenCodec>`
/// - `secure_cookies: bool`
///
/// # Example
/// ```ignore
/// use tollgate::impl_has_auth_state;
///
/// #[derive(Clone)]
/// pub struct MyState {
///     pub codec: Arc<TokenCodec>,
///     pub secure_cookies: bool,
///     // ... other fields
/// }
///
/// impl_has_auth_state!(MyState);
/// ```
#[macro_export]
macro_rules! impl_has_auth_state {
    ($state_type:ty) => {
        impl $crate::auth::HasAuthState for $state_type {
            fn codec(&self) -> &$crate::jwt::TokenCodec {
                &self.codec
            }
            fn secure_cookies(&self) -> bool {
                self.secure_cookies
            }
        }
    };
}
