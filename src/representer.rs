//! The representer, lowers serde data into [`Node`] trees.
use crate::*;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{
    ser::{
        SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
        SerializeTupleStruct, SerializeTupleVariant,
    },
    Serialize, Serializer,
};

macro_rules! impl_serializer {
    (@) => { () };
    (@$ty:ty, $name:ident) => { $name };
    ($(fn $method:ident$(($ty:ty))?)+) => {
        $(fn $method(self$(, v: $ty)?) -> Result<Self::Ok, Self::Error> {
            Ok(self.scalar(Node::from(impl_serializer!(@$($ty, v)?))))
        })+
    };
}

macro_rules! impl_seq_serializer {
    ($(impl $trait:ident for $ty:ident => $method:ident)+) => {
        $(impl $trait for $ty<'_> {
            type Ok = Node;
            type Error = SerdeError;

            fn $method<T>(&mut self, value: &T) -> Result<(), Self::Error>
            where
                T: Serialize + ?Sized,
            {
                self.items.push(self.repr.represent(value)?);
                Ok(())
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                Ok(self.finish())
            }
        })+
    };
}

macro_rules! impl_struct_serializer {
    ($(impl $trait:ident for $ty:ident)+) => {
        $(impl $trait for $ty<'_> {
            type Ok = Node;
            type Error = SerdeError;

            fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
            where
                T: Serialize + ?Sized,
            {
                self.entries.push((self.repr.represent(key)?, self.repr.represent(value)?));
                Ok(())
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                Ok(self.finish())
            }
        })+
    };
}

/// Turn serializable data into nodes.
///
/// The style options are applied to every created node.
///
/// | Data | Node |
/// |---|---|
/// | unit, none, unit struct | `null` |
/// | bool, integers, floats | `bool`, `int`, `float` scalar |
/// | char, string | `str` scalar |
/// | bytes | `binary` scalar of base64 text |
/// | sequence, tuple | sequence |
/// | map, struct | mapping |
/// | unit variant | `str` scalar of the variant name |
/// | other variants | mapping of one entry `{variant: value}` |
///
/// ```
/// use serde::Serialize;
/// use yaml_dump::{node, Representer};
///
/// #[derive(Serialize)]
/// struct Member<'a> {
///     name: &'a str,
///     married: bool,
///     age: u8,
/// }
///
/// let officer = Member { name: "Bob", married: true, age: 46 };
/// let officer_yaml = node!({
///     "name" => "Bob",
///     "married" => true,
///     "age" => 46,
/// });
/// assert_eq!(officer_yaml, Representer::default().represent(&officer).unwrap());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Representer {
    /// Style hint of the created scalars.
    pub scalar_style: ScalarStyle,
    /// Style hint of the created collections.
    pub collection_style: CollectionStyle,
}

impl Representer {
    /// Builder function for the scalar style hint.
    pub fn scalar_style(mut self, style: ScalarStyle) -> Self {
        self.scalar_style = style;
        self
    }

    /// Builder function for the collection style hint.
    pub fn collection_style(mut self, style: CollectionStyle) -> Self {
        self.collection_style = style;
        self
    }

    /// Represent the value as a node tree.
    pub fn represent<T: Serialize + ?Sized>(&self, value: &T) -> Result<Node, SerdeError> {
        value.serialize(NodeSerializer { repr: self })
    }

    fn scalar(&self, n: Node) -> Node {
        n.style(self.scalar_style)
    }

    fn seq(&self, items: Seq) -> Node {
        Node::new(Yaml::Seq(items)).collection_style(self.collection_style)
    }

    fn map(&self, entries: Map) -> Node {
        Node::new(Yaml::Map(entries)).collection_style(self.collection_style)
    }

    /// The mapping of one entry, used by enum variants.
    fn variant(&self, variant: &str, value: Node) -> Node {
        self.map(vec![(self.scalar(Node::from(variant)), value)])
    }
}

struct NodeSerializer<'a> {
    repr: &'a Representer,
}

impl NodeSerializer<'_> {
    fn scalar(&self, n: Node) -> Node {
        self.repr.scalar(n)
    }
}

impl<'a> Serializer for NodeSerializer<'a> {
    type Ok = Node;
    type Error = SerdeError;
    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = SeqSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = MapSerializer<'a>;
    type SerializeStructVariant = MapSerializer<'a>;

    impl_serializer! {
        fn serialize_bool(bool)
        fn serialize_i8(i8)
        fn serialize_i16(i16)
        fn serialize_i32(i32)
        fn serialize_i64(i64)
        fn serialize_i128(i128)
        fn serialize_u8(u8)
        fn serialize_u16(u16)
        fn serialize_u32(u32)
        fn serialize_u64(u64)
        fn serialize_u128(u128)
        fn serialize_f32(f32)
        fn serialize_f64(f64)
        fn serialize_char(char)
        fn serialize_str(&str)
        fn serialize_unit
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        Ok(self.scalar(Node::from(STANDARD.encode(v)).tag(tag::BINARY)))
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(self.repr.variant(variant, self.repr.represent(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(SeqSerializer {
            repr: self.repr,
            items: Vec::with_capacity(len.unwrap_or_default()),
            variant: None,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(SeqSerializer {
            repr: self.repr,
            items: Vec::with_capacity(len),
            variant: Some(variant),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapSerializer {
            repr: self.repr,
            entries: Vec::with_capacity(len.unwrap_or_default()),
            key: None,
            variant: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(MapSerializer {
            repr: self.repr,
            entries: Vec::with_capacity(len),
            key: None,
            variant: Some(variant),
        })
    }
}

struct SeqSerializer<'a> {
    repr: &'a Representer,
    items: Seq,
    variant: Option<&'static str>,
}

impl SeqSerializer<'_> {
    fn finish(self) -> Node {
        let n = self.repr.seq(self.items);
        match self.variant {
            Some(variant) => self.repr.variant(variant, n),
            None => n,
        }
    }
}

struct MapSerializer<'a> {
    repr: &'a Representer,
    entries: Map,
    key: Option<Node>,
    variant: Option<&'static str>,
}

impl MapSerializer<'_> {
    fn finish(self) -> Node {
        let n = self.repr.map(self.entries);
        match self.variant {
            Some(variant) => self.repr.variant(variant, n),
            None => n,
        }
    }
}

impl_seq_serializer! {
    impl SerializeSeq for SeqSerializer => serialize_element
    impl SerializeTuple for SeqSerializer => serialize_element
    impl SerializeTupleStruct for SeqSerializer => serialize_field
    impl SerializeTupleVariant for SeqSerializer => serialize_field
}

impl_struct_serializer! {
    impl SerializeStruct for MapSerializer
    impl SerializeStructVariant for MapSerializer
}

impl SerializeMap for MapSerializer<'_> {
    type Ok = Node;
    type Error = SerdeError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.key = Some(self.repr.represent(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| SerdeError("mapping value without a key".into()))?;
        self.entries.push((key, self.repr.represent(value)?));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.finish())
    }
}
