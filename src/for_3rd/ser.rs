//! Serialization of Real.
//! A number is serialized as a structure of its precision and its decimal string.

use serde::ser::Error;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::Real;

impl Serialize for Real {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.render().map_err(Error::custom)?;

        let mut st = serializer.serialize_struct("Real", 2)?;
        st.serialize_field("prec", &self.prec())?;
        st.serialize_field("value", &value)?;
        st.end()
    }
}
