//! Descriptor builders for the header slots every CAEX type shares

/// Descriptor of a type carrying the basic header: `ChangeMode` plus the
/// `Description`, `Version`, `Revision`, `Copyright` and
/// `AdditionalInformation` children, followed by the type's own slots.
macro_rules! basic_descriptor {
    (
        $element:literal,
        attributes: [$($attribute:expr),* $(,)?],
        children: [$($child:expr),* $(,)?] $(,)?
    ) => {
        caex_generic::SchemaDescriptor {
            element: $element,
            attributes: &[
                caex_generic::AttributeSlot::optional("ChangeMode"),
                $($attribute,)*
            ],
            children: &[
                caex_generic::ChildSlot::simple("Description"),
                caex_generic::ChildSlot::simple("Version"),
                caex_generic::ChildSlot::object_list("Revision"),
                caex_generic::ChildSlot::simple("Copyright"),
                caex_generic::ChildSlot::simple_list("AdditionalInformation"),
                $($child,)*
            ],
        }
    };
}

/// Like [`basic_descriptor!`] with the `ID` and required `Name` attributes
/// of named CAEX objects.
macro_rules! object_descriptor {
    (
        $element:literal,
        attributes: [$($attribute:expr),* $(,)?],
        children: [$($child:expr),* $(,)?] $(,)?
    ) => {
        basic_descriptor!(
            $element,
            attributes: [
                caex_generic::AttributeSlot::optional("ID"),
                caex_generic::AttributeSlot::required("Name"),
                $($attribute,)*
            ],
            children: [$($child,)*],
        )
    };
}

/// Implements the descriptor and downcast parts of `Generalizable`; the
/// type's own `slot` lookup is passed as a method name.
macro_rules! impl_generalizable {
    ($ty:ty, $descriptor:expr) => {
        impl caex_generic::Generalizable for $ty {
            fn descriptor(&self) -> &'static caex_generic::SchemaDescriptor {
                &$descriptor
            }

            fn slot(&self, name: &str) -> Option<caex_generic::SlotValue<'_>> {
                self.lookup(name)
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}
