// Copyright 2026 The anf contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Various utilities.

/// Define an enum that maps to a string in the API.
///
/// The `enum Name = Fallback { ... }` form never fails: unrecognized values
/// become `Fallback`. The `enum Name { ... }` form rejects them.
/// Matching is case-insensitive in both forms.
macro_rules! protocol_enum {
    {$(#[$attr:meta])* enum $name:ident = $def:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+
    }} => (
        protocol_enum! {@common $(#[$attr])* $name { $($(#[$iattr])* $item = $val),+ } }

        impl Default for $name {
            fn default() -> $name {
                $name::$def
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<$name, Self::Err> {
                Ok($name::from_api_str(s).unwrap_or($name::$def))
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<$name, D::Error>
            where
                D: ::serde::de::Deserializer<'de>,
            {
                let value = <String as ::serde::de::Deserialize>::deserialize(deserializer)?;
                Ok($name::from_api_str(&value).unwrap_or_else(|| {
                    debug!("Unrecognized {} value {:?}", stringify!($name), value);
                    $name::$def
                }))
            }
        }
    );

    {$(#[$attr:meta])* enum $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+
    }} => (
        protocol_enum! {@common $(#[$attr])* $name { $($(#[$iattr])* $item = $val),+ } }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<$name, Self::Err> {
                $name::from_api_str(s).ok_or_else(|| {
                    $crate::Error::new(
                        $crate::ErrorKind::InvalidInput,
                        format!("Invalid {} value {:?}", stringify!($name), s),
                    )
                })
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<$name, D::Error>
            where
                D: ::serde::de::Deserializer<'de>,
            {
                let value = <String as ::serde::de::Deserialize>::deserialize(deserializer)?;
                $name::from_api_str(&value).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "invalid {} value {:?}",
                        stringify!($name),
                        value
                    ))
                })
            }
        }
    );

    {@common $(#[$attr:meta])* $name:ident {
        $($(#[$iattr:meta])* $item:ident = $val:literal),+
    }} => (
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$iattr])* $item),+
        }

        impl $name {
            /// String representation used by the API.
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $($name::$item => $val),+
                }
            }

            fn from_api_str(value: &str) -> Option<$name> {
                $(
                    if value.eq_ignore_ascii_case($val) {
                        return Some($name::$item);
                    }
                )+
                None
            }
        }

        impl ::serde::ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::ser::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                String::from(value.as_str())
            }
        }
    );
}

/// Expose a field of the `inner` protocol structure as a getter.
macro_rules! transparent_property {
    ($(#[$attr:meta])* $name:ident: ref $type:ty => $($path:ident).+) => (
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> &$type {
            &self.inner$(.$path)+
        }
    );

    ($(#[$attr:meta])* $name:ident: $type:ty => $($path:ident).+) => (
        $(#[$attr])*
        #[inline]
        pub fn $name(&self) -> $type {
            self.inner$(.$path)+
        }
    );

    ($(#[$attr:meta])* $name:ident: ref $type:ty) => (
        transparent_property! { $(#[$attr])* $name: ref $type => $name }
    );

    ($(#[$attr:meta])* $name:ident: $type:ty) => (
        transparent_property! { $(#[$attr])* $name: $type => $name }
    );
}

/// Generate a setter and a builder-style `with_` method for a creation field.
macro_rules! creation_inner_field {
    ($(#[$attr:meta])* $set_func:ident, $with_func:ident -> $($path:ident).+ : optional $type:ty) => (
        $(#[$attr])*
        pub fn $set_func<S: Into<$type>>(&mut self, value: S) {
            self.inner$(.$path)+ = Some(value.into());
        }

        $(#[$attr])*
        #[inline]
        pub fn $with_func<S: Into<$type>>(mut self, value: S) -> Self {
            self.$set_func(value);
            self
        }
    );

    ($(#[$attr:meta])* $set_func:ident, $with_func:ident -> $($path:ident).+ : $type:ty) => (
        $(#[$attr])*
        pub fn $set_func<S: Into<$type>>(&mut self, value: S) {
            self.inner$(.$path)+ = value.into();
        }

        $(#[$attr])*
        #[inline]
        pub fn $with_func<S: Into<$type>>(mut self, value: S) -> Self {
            self.$set_func(value);
            self
        }
    );
}
