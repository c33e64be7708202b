use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// A single `name = expression` pair inside `#[error(..)]`.
struct Tag {
    name: Ident,
    value: Expr,
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        Ok(Self { name, value: input.parse()? })
    }
}

/// A struct deriving [`ErrorKind`], along with the tags given in its `error` attribute.
pub(crate) struct ErrorKindTarget {
    item: ItemStruct,
    message: Expr,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let item = input.parse::<ItemStruct>()?;

        let mut message = None;
        let mut labels = None;
        let mut help = None;
        if let Some(attr) = item.attrs.iter().find(|attr| attr.path().is_ident("error")) {
            let tags = attr.parse_args_with(Punctuated::<Tag, Token![,]>::parse_terminated)?;
            for Tag { name, value } in tags {
                let slot = match name.to_string().as_str() {
                    "message" => &mut message,
                    "labels" => &mut labels,
                    "help" => &mut help,
                    other => return Err(syn::Error::new_spanned(&name, format!("unknown tag `{}`", other))),
                };
                if slot.replace(value).is_some() {
                    return Err(syn::Error::new_spanned(&name, format!("duplicate tag `{}`", name)));
                }
            }
        }

        let Some(message) = message else {
            return Err(syn::Error::new_spanned(&item.ident, "missing `#[error(message = ...)]` attribute"));
        };

        Ok(Self { item, message, labels, help })
    }
}

impl ErrorKindTarget {
    /// A `let` statement binding each named field of `self`, so the tag expressions can use them.
    fn bind_fields(&self) -> TokenStream2 {
        match &self.item.fields {
            Fields::Named(fields) => {
                let names = fields.named.iter().map(|field| &field.ident);
                quote! {
                    #[allow(unused_variables)]
                    let Self { #(#names),* } = self;
                }
            },
            Fields::Unnamed(_) => quote_spanned! {
                self.item.ident.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => TokenStream2::new(),
        }
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.item.ident;
        let (impl_generics, ty_generics, where_clause) = self.item.generics.split_for_impl();
        let bind_fields = self.bind_fields();
        let message = &self.message;
        let labels = self.labels
            .as_ref()
            .map_or_else(|| quote! { [""] }, |labels| labels.to_token_stream());
        let help = self.help.as_ref().map(|help| quote! { report.set_help(#help); });

        tokens.extend(quote! {
            impl #impl_generics ErrorKind for #name #ty_generics #where_clause {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[::std::ops::Range<usize>],
                ) -> ::ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                    #bind_fields

                    let labels = #labels
                        .into_iter()
                        .zip(spans)
                        .map(|(text, span)| {
                            let text = text.to_string();
                            let label = ::ariadne::Label::new((src_id, span.clone()))
                                .with_color(::game24_error::EXPR);
                            if text.is_empty() { label } else { label.with_message(text) }
                        });

                    let offset = spans.first().map_or(0, |span| span.start);
                    #[allow(unused_mut)]
                    let mut report = ::ariadne::Report::build(::ariadne::ReportKind::Error, src_id, offset)
                        .with_message(#message)
                        .with_labels(labels);
                    #help
                    report.finish()
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(source: &str) -> String {
        match syn::parse_str::<ErrorKindTarget>(source) {
            Ok(_) => panic!("expected `{}` to be rejected", source),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn expands_to_impl() {
        let target = syn::parse_str::<ErrorKindTarget>(r#"
            /// Docs are skipped.
            #[error(message = format!("bad {}", word), labels = ["here"],)]
            struct Bad { word: String }
        "#).unwrap();
        let tokens = target
            .to_token_stream()
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();
        assert!(tokens.contains("implErrorKindforBad"));
        assert!(tokens.contains("letSelf{word}=self;"));
        assert!(!tokens.contains("set_help"));
    }

    #[test]
    fn rejects_bad_attributes() {
        assert_eq!(error("#[error(message = \"a\", hint = \"b\")] struct A;"), "unknown tag `hint`");
        assert_eq!(error("#[error(message = \"a\", message = \"b\")] struct A;"), "duplicate tag `message`");
        assert_eq!(error("#[error(labels = [\"a\"])] struct A;"), "missing `#[error(message = ...)]` attribute");
        assert_eq!(error("struct A;"), "missing `#[error(message = ...)]` attribute");
    }
}
