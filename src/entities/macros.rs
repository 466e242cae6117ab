//! Macros for reducing boilerplate when defining entities
//!
//! Every stored record has an `id: i32` field; named records also have a
//! `name: String` field. These macros generate the matching trait impls.

/// Implement [`Entity`](crate::core::Entity) for a struct with an `id: i32` field
///
/// Pass `named` as a third argument to also implement
/// [`Named`](crate::core::Named) from a `name: String` field.
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Toy {
///     pub id: i32,
///     pub name: String,
/// }
///
/// impl_entity!(Toy, "toy", named);
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $entity_type:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn entity_type() -> &'static str {
                $entity_type
            }

            fn id(&self) -> i32 {
                self.id
            }

            fn set_id(&mut self, id: i32) {
                self.id = id;
            }
        }
    };
    ($type:ident, $entity_type:expr, named) => {
        $crate::impl_entity!($type, $entity_type);

        impl $crate::core::entity::Named for $type {
            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

/// Implement `PartialEq`/`Eq` on the `(id, name)` pair only
///
/// Quantity, cost and the other payload fields do not take part in identity.
#[macro_export]
macro_rules! impl_identity_eq {
    ($type:ident) => {
        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id && self.name == other.name
            }
        }

        impl Eq for $type {}
    };
}
