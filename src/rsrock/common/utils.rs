use std::fmt::Debug;

pub trait VecExt<A> {
    fn into_single(self) -> A;
}

impl<A: Debug> VecExt<A> for Vec<A> {
    fn into_single(mut self) -> A {
        assert_eq!(self.len(), 1, "Expected vector with single element, got {:?}", self);
        match self.pop() {
            Some(a) => a,
            None => unreachable!(),
        }
    }
}

pub fn debug_mk_string<'a, A: Debug + 'a, I>(i: I) -> String
    where I: IntoIterator<Item=&'a A>
{
    i.into_iter().map(|e: &A| format!("{:?}", e)).collect::<Vec<_>>().join("\n")
}
