mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use game24_attrs::ErrorKind;
/// use game24_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, one for each span of the error, in order.           |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that should evaluate to something implementing
/// [`ToString`]. For structs with named fields, the expression is evaluated with the fields of the
/// struct in scope (as references), so they can be used in the expression. Tuple structs are not
/// supported.
///
/// [`ErrorKind`]: https://docs.rs/game24-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    parse_macro_input!(item as ErrorKindTarget).into_token_stream().into()
}
