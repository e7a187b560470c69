pub fn impl_position(input: syn::Result<syn::DeriveInput>) -> syn::Result<proc_macro2::TokenStream> {
    let mut input = input?;

    let position_ty = match &input.data {
        syn::Data::Struct(data_struct) => Ok(crate::get_field("position", data_struct)
            .ok_or_else(|| syn::Error::new_spanned(&data_struct.fields, "no `position` field"))?
            .ty
            .clone()),
        syn::Data::Enum(data_enum) => Err(syn::Error::new_spanned(
            data_enum.enum_token,
            "the `Position` trait can only be derived for struct types",
        )),
        syn::Data::Union(data_union) => Err(syn::Error::new_spanned(
            data_union.union_token,
            "the `Position` trait can only be derived for struct types",
        )),
    }?;

    input
        .generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote! {
            #position_ty: ::core::clone::Clone
        });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let name = &input.ident;

    Ok(quote::quote! {
        impl #impl_generics Position for #name #ty_generics #where_clause {
            type Vector = #position_ty;

            #[inline]
            fn position(&self) -> Self::Vector {
                self.position.clone()
            }
        }
    })
}
