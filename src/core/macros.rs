//! Macros for declaring state enums.

/// Declare a unit-variant enum and implement [`State`](crate::core::State) for it.
///
/// The generated enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
/// `Debug` and serde's traits, and gets a `VARIANTS` constant listing every
/// variant in declaration order.
///
/// # Example
///
/// ```
/// use keypad::state_enum;
/// use keypad::core::State;
///
/// state_enum! {
///     pub enum Door {
///         Open,
///         Closed,
///         Jammed,
///     }
///     final: [Jammed]
///     error: [Jammed]
/// }
///
/// assert_eq!(Door::Closed.name(), "Closed");
/// assert!(Door::Jammed.is_error());
/// assert_eq!(Door::VARIANTS.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const VARIANTS: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum Relay {
            Open,
            Closing,
            Closed,
            Fused,
        }
        final: [Closed, Fused]
        error: [Fused]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(Relay::Closing.name(), "Closing");
        assert!(!Relay::Open.is_final());
        assert!(Relay::Closed.is_final());
        assert!(!Relay::Closed.is_error());
        assert!(Relay::Fused.is_error());
    }

    #[test]
    fn variants_follow_declaration_order() {
        assert_eq!(
            Relay::VARIANTS,
            &[Relay::Open, Relay::Closing, Relay::Closed, Relay::Fused]
        );
    }

    #[test]
    fn state_enum_works_without_final_error() {
        state_enum! {
            enum Toggle {
                Up,
                Down,
            }
        }

        assert!(!Toggle::Up.is_final());
        assert!(!Toggle::Down.is_error());
    }
}
