use nom::{
    Compare, CompareResult, Err, InputIter, InputLength, InputTake, InputTakeAtPosition, Offset,
    Slice,
};
use std::{
    ops::{Range, RangeFrom, RangeTo},
    str::{CharIndices, Chars},
};

/// Cursor over the source text that knows which line it starts on.
///
/// Every slice that moves the start forward adds the newlines it skipped, so
/// the line survives any nom combinator that consumes input.
#[derive(Clone, Debug, Copy)]
pub struct Input<'a> {
    data: &'a str,
    line: usize,
}

impl<'a> Input<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, line: 1 }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn fragment(&self) -> &'a str {
        self.data
    }

    /// Input positioned at the very end, with every remaining newline counted.
    pub fn exhausted(&self) -> Self {
        self.slice(self.data.len()..)
    }

    fn advance(&self, next_data: &'a str) -> Self {
        let offset = self.data.offset(next_data);

        if offset == 0 {
            return Self {
                data: next_data,
                line: self.line,
            };
        }

        let skipped = &self.data.as_bytes()[..offset];

        Self {
            data: next_data,
            line: self.line + bytecount::count(skipped, b'\n'),
        }
    }
}

impl<'a, 'b> Compare<&'b str> for Input<'a> {
    fn compare(&self, t: &'b str) -> CompareResult {
        self.data.compare(t)
    }

    fn compare_no_case(&self, t: &'b str) -> CompareResult {
        self.data.compare_no_case(t)
    }
}

impl<'a> InputIter for Input<'a> {
    type Item = char;

    type Iter = CharIndices<'a>;

    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.data.iter_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.data.iter_elements()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.data.position(predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, nom::Needed> {
        self.data.slice_index(count)
    }
}

impl<'a> InputLength for Input<'a> {
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

impl<'a> InputTake for Input<'a> {
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl<'a> InputTakeAtPosition for Input<'a> {
    type Item = char;

    fn split_at_position<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position1<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
        e: nom::error::ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position_complete<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.split_at_position(predicate) {
            Err(Err::Incomplete(_)) => Ok(self.take_split(self.input_len())),
            res => res,
        }
    }

    fn split_at_position1_complete<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
        e: nom::error::ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => {
                if self.data.is_empty() {
                    Err(Err::Error(E::from_error_kind(*self, e)))
                } else {
                    Ok(self.take_split(self.input_len()))
                }
            }
        }
    }
}

impl<'a> Offset for Input<'a> {
    fn offset(&self, second: &Self) -> usize {
        self.data.offset(second.data)
    }
}

impl<'a> Slice<Range<usize>> for Input<'a> {
    fn slice(&self, range: Range<usize>) -> Self {
        self.advance(self.data.slice(range))
    }
}

impl<'a> Slice<RangeTo<usize>> for Input<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        self.advance(self.data.slice(range))
    }
}

impl<'a> Slice<RangeFrom<usize>> for Input<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        self.advance(self.data.slice(range))
    }
}

#[cfg(test)]
mod tests {
    use super::Input;
    use nom::{InputTake, Slice};

    #[test]
    fn starts_on_line_one() {
        let input = Input::new("abc");

        assert_eq!(input.line(), 1);
        assert_eq!(input.fragment(), "abc");
    }

    #[test]
    fn counts_skipped_newlines() {
        let input = Input::new("a\nb\n\nc");

        let rest = input.slice(4..);

        assert_eq!(rest.fragment(), "\nc");
        assert_eq!(rest.line(), 3);
        assert_eq!(rest.slice(1..).line(), 4);
    }

    #[test]
    fn prefix_keeps_line() {
        let input = Input::new("x\ny").slice(2..);

        let (rest, taken) = input.take_split(1);

        assert_eq!(taken.fragment(), "y");
        assert_eq!(taken.line(), 2);
        assert_eq!(rest.line(), 2);
        assert!(rest.fragment().is_empty());
    }

    #[test]
    fn exhausted_counts_everything() {
        let input = Input::new("1\n2\n");

        let end = input.exhausted();

        assert!(end.fragment().is_empty());
        assert_eq!(end.line(), 3);
    }
}
