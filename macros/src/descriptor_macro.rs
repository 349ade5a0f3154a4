//! descriptor! macro: parse member declarations, validate them, and generate
//! a `trellis::descriptor::DescriptorBuilder` chain.

use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, Lit, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A property default: an optionally negated literal.
#[derive(Clone)]
pub(crate) struct DefaultValue {
    pub negative: bool,
    pub lit: Lit,
}

/// One declared member.
#[derive(Clone)]
pub(crate) enum Member {
    Property {
        name: Ident,
        default: Option<DefaultValue>,
        no_rerender: bool,
    },
    Aggregation {
        name: Ident,
        anchor: LitStr,
    },
    Event {
        name: Ident,
    },
}

impl Member {
    fn name(&self) -> &Ident {
        match self {
            Member::Property { name, .. } | Member::Aggregation { name, .. } | Member::Event { name } => name,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Member::Property { .. } => "property",
            Member::Aggregation { .. } => "aggregation",
            Member::Event { .. } => "event",
        }
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("kind", &self.kind())
            .field("name", &self.name().to_string())
            .finish()
    }
}

/// The top-level descriptor! input: a sequence of `;`-terminated members.
#[derive(Debug)]
pub(crate) struct DescriptorInput {
    pub members: Vec<Member>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for DescriptorInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut members = Vec::new();
        while !input.is_empty() {
            members.push(parse_member(input)?);
            input.parse::<Token![;]>()?;
        }
        Ok(DescriptorInput { members })
    }
}

fn parse_member(input: ParseStream) -> Result<Member> {
    let keyword: Ident = input.parse()?;
    let name: Ident = input.parse()?;
    match keyword.to_string().as_str() {
        "property" => {
            let default = if input.peek(Token![=]) {
                input.parse::<Token![=]>()?;
                let negative = input.peek(Token![-]);
                if negative {
                    input.parse::<Token![-]>()?;
                }
                Some(DefaultValue {
                    negative,
                    lit: input.parse()?,
                })
            } else {
                None
            };
            let mut no_rerender = false;
            if input.peek(Ident) {
                let flag: Ident = input.parse()?;
                if flag != "no_rerender" {
                    return Err(Error::new(flag.span(), "expected `no_rerender` or `;`"));
                }
                no_rerender = true;
            }
            Ok(Member::Property {
                name,
                default,
                no_rerender,
            })
        }
        "aggregation" => {
            input.parse::<Token![=>]>()?;
            let anchor = if input.peek(LitStr) {
                input.parse::<LitStr>()?
            } else {
                let ident: Ident = input.parse()?;
                LitStr::new(&ident.to_string(), ident.span())
            };
            Ok(Member::Aggregation { name, anchor })
        }
        "event" => Ok(Member::Event { name }),
        other => Err(Error::new(
            keyword.span(),
            format!("unknown member kind `{other}`: expected `property`, `aggregation` or `event`"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(members: &[Member]) -> Result<()> {
    let mut seen: HashMap<String, &'static str> = HashMap::new();
    for member in members {
        let name = member.name();
        let text = name.to_string();

        if !text.starts_with(|c: char| c.is_ascii_alphabetic())
            || !text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::new(name.span(), format!("invalid {} name `{text}`", member.kind())));
        }
        if let Some(first) = seen.insert(text.clone(), member.kind()) {
            return Err(Error::new(
                name.span(),
                format!("`{text}` declared as {} but already declared as {first}", member.kind()),
            ));
        }

        match member {
            Member::Aggregation { anchor, .. } => {
                if text.len() < 2 || !text.ends_with('s') {
                    return Err(Error::new(
                        name.span(),
                        format!("aggregation `{text}` is not a regular plural (must end in `s`)"),
                    ));
                }
                if anchor.value().is_empty() {
                    return Err(Error::new(anchor.span(), "anchor name must not be empty"));
                }
            }
            Member::Property {
                default: Some(default), ..
            } if text == "id" => match &default.lit {
                Lit::Str(s) if !s.value().trim().is_empty() => {}
                _ => return Err(Error::new(name.span(), "`id` default must be non-empty text")),
            },
            _ => {}
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn generate_default(default: &DefaultValue) -> Result<TokenStream> {
    let sign = if default.negative { quote!(-) } else { quote!() };
    let lit = &default.lit;
    match lit {
        Lit::Str(_) if default.negative => Err(Error::new(lit.span(), "cannot negate text")),
        Lit::Bool(_) if default.negative => Err(Error::new(lit.span(), "cannot negate a bool")),
        Lit::Str(s) => Ok(quote!(::trellis::value::Value::Text(::std::string::String::from(#s)))),
        Lit::Bool(b) => Ok(quote!(::trellis::value::Value::Bool(#b))),
        Lit::Int(i) => Ok(quote!(::trellis::value::Value::Int(#sign (#i as i64)))),
        Lit::Float(f) => Ok(quote!(::trellis::value::Value::Float(#sign (#f as f64)))),
        other => Err(Error::new(other.span(), "unsupported default: expected text, bool, integer or float")),
    }
}

fn generate_member(member: &Member) -> Result<TokenStream> {
    let name = LitStr::new(&member.name().to_string(), Span::call_site());
    match member {
        Member::Property {
            default, no_rerender, ..
        } => {
            let mut spec = quote!(::trellis::descriptor::PropertySpec::new());
            if let Some(default) = default {
                let value = generate_default(default)?;
                spec = quote!(#spec.with_default(#value));
            }
            if *no_rerender {
                spec = quote!(#spec.prevent_rerendering());
            }
            Ok(quote!(.property(#name, #spec)))
        }
        Member::Aggregation { anchor, .. } => Ok(quote!(.aggregation(#name, #anchor))),
        Member::Event { .. } => Ok(quote!(.event(#name))),
    }
}

/// Entry point for the descriptor! proc macro.
pub(crate) fn descriptor_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: DescriptorInput = syn::parse2(input)?;
    validate(&parsed.members)?;
    let calls = parsed
        .members
        .iter()
        .map(generate_member)
        .collect::<Result<Vec<_>>>()?;
    Ok(quote! {
        ::trellis::descriptor::DescriptorBuilder::new() #(#calls)*
    })
}

// ===========================================================================
// Tests
// ===========================================================================
