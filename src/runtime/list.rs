use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::value::Value;

pub type ListRef = Rc<RefCell<ListObject>>;

#[derive(Debug, Clone, Default)]
pub struct ListObject {
    values: Vec<Value>,
}

impl ListObject {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn into_ref(self) -> ListRef {
        Rc::new(RefCell::new(self))
    }

    pub fn __len__(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn append(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn __getitem__(&self, index: usize) -> Option<Value> {
        self.values.get(index).cloned()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn render(&self) -> String {
        let rendered = self
            .iter()
            .map(Value::repr)
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{rendered}]")
    }
}

#[cfg(test)]
mod tests {
    use super::ListObject;
    use crate::runtime::value::Value;

    #[test]
    fn supports_len_get_and_append() {
        let mut list = ListObject::new(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.__len__(), 2);
        assert_eq!(list.__getitem__(0).expect("index 0").repr(), "1");
        list.append(Value::Int(9));
        assert_eq!(list.__len__(), 3);
        assert_eq!(list.__getitem__(2).expect("index 2").repr(), "9");
        assert!(list.__getitem__(3).is_none());
    }

    #[test]
    fn renders_items_in_repr_form() {
        let list = ListObject::new(vec![Value::Int(1), Value::str("a"), Value::None]);
        assert_eq!(list.render(), "[1, 'a', None]");
        assert_eq!(ListObject::default().render(), "[]");
    }
}
