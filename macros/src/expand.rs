//! Renders validation reports as macro output.
//!
//! Errors become `compile_error!`s. Warnings go through the deprecation lint,
//! the only warning channel a stable proc macro has. Fix-its are rendered as
//! `help:` lines.
//!
//! The macro always validates with `ValidatorConfig::default()`: the entry
//! point names are the exported macro names, so `SQLITE_VALIDATOR_*`
//! variables and `.env` files do not affect `sql_query!`. They only
//! configure the `sqlcheck` binary.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use sqlite_validator::{
    ClassifiedSegment, Diagnostic, EntryPoint, SourceAnchor, ValidationReport, Validator,
    ValidatorError,
};
use syn::{Expr, LitStr};

pub fn expand(input: TokenStream, entry_point: EntryPoint) -> TokenStream {
    match try_expand(input, entry_point) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(input: TokenStream, entry_point: EntryPoint) -> syn::Result<TokenStream> {
    let literal: LitStr = syn::parse2(input)
        .map_err(|e| syn::Error::new(e.span(), ValidatorError::NotALiteral.to_string()))?;
    let value = literal.value();

    let report = Validator::default()
        .validate(&value, entry_point)
        .map_err(|e| syn::Error::new(literal.span(), e.to_string()))?;

    if let Some(err) = compile_errors(&report, &literal) {
        return Err(err);
    }

    let query = format_call(&report, &value, &literal)?;
    let warnings = report
        .diagnostics()
        .iter()
        .enumerate()
        .map(|(index, diagnostic)| warning(diagnostic, index, literal.span()));

    Ok(quote! {
        {
            #(#warnings)*
            #query
        }
    })
}

fn compile_errors(report: &ValidationReport, literal: &LitStr) -> Option<syn::Error> {
    report
        .diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.is_error())
        .map(|diagnostic| syn::Error::new(anchor_span(&diagnostic.anchor, literal), render(diagnostic)))
        .reduce(|mut combined, err| {
            combined.combine(err);
            combined
        })
}

/// `format!` call producing the query at run time: literal fragments keep
/// their raw text (so `{{`/`}}` stay escaped) and each hole becomes a
/// positional `{}`.
fn format_call(report: &ValidationReport, value: &str, literal: &LitStr) -> syn::Result<TokenStream> {
    let mut template = String::new();
    let mut args: Vec<Expr> = Vec::new();

    for segment in &report.segments {
        match segment {
            ClassifiedSegment::Literal(fragment) => template.push_str(&value[fragment.range.clone()]),
            ClassifiedSegment::Placeholder { hole, .. } => {
                template.push_str("{}");
                let expr = syn::parse_str(&hole.expression).map_err(|e| {
                    syn::Error::new(
                        literal.span(),
                        format!("invalid interpolation expression `{}`: {}", hole.expression, e),
                    )
                })?;
                args.push(expr);
            }
        }
    }

    let template = LitStr::new(&template, literal.span());
    Ok(quote! { ::std::format!(#template #(, #args)*) })
}

fn warning(diagnostic: &Diagnostic, index: usize, span: Span) -> TokenStream {
    let note = render(diagnostic);
    let name = format_ident!("sql_query_warning_{}", index, span = span);
    quote_spanned! {span=>
        #[deprecated(note = #note)]
        #[allow(dead_code)]
        fn #name() {}
        #name();
    }
}

/// Sub-literal spans are nightly-only, so literal anchors use the whole
/// literal.
fn anchor_span(anchor: &SourceAnchor, literal: &LitStr) -> Span {
    match anchor {
        SourceAnchor::Literal(_) => literal.span(),
        SourceAnchor::Invocation | SourceAnchor::EntryPointName => Span::call_site(),
    }
}

fn render(diagnostic: &Diagnostic) -> String {
    let mut message = diagnostic.message.clone();
    for fix_it in &diagnostic.fix_its {
        message.push_str(&format!("\nhelp: {}: `{}`", fix_it.description, fix_it.replacement));
    }
    message
}
