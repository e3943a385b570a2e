/// Defines a new type for storing data in Context.
///
/// * `$data_plugin`: Name of the plugin key type
/// * `$data_container`: The type of the stored data
/// * `$default`: Expression producing the initial value of the container
#[macro_export]
macro_rules! define_data_plugin {
    ($data_plugin:ident, $data_container:ty, $default: expr) => {
        struct $data_plugin;

        impl $crate::context::DataPlugin for $data_plugin {
            type DataContainer = $data_container;

            fn create_data_container() -> Self::DataContainer {
                $default
            }
        }
    };
}
pub use define_data_plugin;

#[macro_export]
macro_rules! assert_almost_eq {
    ($a:expr, $b:expr, $prec:expr $(,)?) => {
        if !$crate::numeric::almost_eq($a, $b, $prec) {
            panic!(
                "assertion failed: `abs(left - right) < {:e}`, (left: `{}`, right: `{}`)",
                $prec, $a, $b
            );
        }
    };
}
pub use assert_almost_eq;

/// Defines a unique type used as the key of an independent random number stream.
///
/// The stream is seeded from the context's base seed and the name of the type, so two
/// streams with the same name in one binary would share their sequence. The generated
/// `#[no_mangle]` static turns such a collision into a link error.
///
/// ```ignore
/// define_rng!(HouseholdRng);
/// define_rng!(pub SpatialRng);
/// ```
#[macro_export]
macro_rules! define_rng {
    ($vis:vis $random_id:ident) => {
        #[derive(Copy, Clone)]
        $vis struct $random_id;

        impl $crate::random::RngId for $random_id {
            type RngType = $crate::rand::rngs::SmallRng;

            fn get_name() -> &'static str {
                stringify!($random_id)
            }
        }

        $crate::paste::paste! {
            #[doc(hidden)]
            #[no_mangle]
            #[allow(non_upper_case_globals)]
            pub static [<rng_name_duplication_guard_ $random_id>]: () = ();
        }
    };
}
pub use define_rng;
