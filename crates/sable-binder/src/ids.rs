//! Typed ids into the symbol arena and the external parse tree.

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// A class-like descriptor (class, trait, object, enum, enum entry).
    ClassId
);
define_id!(
    /// A member or top-level function descriptor.
    FunctionId
);
define_id!(
    /// A member or top-level property descriptor.
    PropertyId
);
define_id!(
    /// A primary or secondary constructor descriptor.
    ConstructorId
);
define_id!(
    /// An opaque expression handle into the external parse tree. Body
    /// resolution never looks inside; the inference engine does.
    ExprId
);
define_id!(
    /// An opaque type-reference handle. The annotated type is looked up in
    /// the `BindingStore`, never recomputed.
    TypeRefId
);
