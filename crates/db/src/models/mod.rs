/// True when every listed `Option` field of a patch is `None`.
macro_rules! all_none {
    ($patch:expr; $($field:ident),+ $(,)?) => {
        true $(&& $patch.$field.is_none())+
    };
}

pub(crate) use all_none;

pub mod conversion;
pub mod gauge;
pub mod hook;
pub mod needle;
pub mod photo;
pub mod project;
pub mod yarn;
