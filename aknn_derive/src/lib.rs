mod position;

/// Derive macro generating an implementation of the trait `Position`.
///
/// The type must be a struct with a field named `position`. The generated implementation clones
/// that field, so its type has to implement `Clone`.
#[proc_macro_derive(Position)]
pub fn position_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    position::impl_position(syn::parse(input))
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn get_field<'a>(name: &str, data_struct: &'a syn::DataStruct) -> Option<&'a syn::Field> {
    data_struct
        .fields
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| ident == name))
}
