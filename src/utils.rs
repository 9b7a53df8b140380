use std::error::Error;
use std::fmt;

pub struct ErrorWithCauses<E>(pub E);

impl<E> fmt::Display for ErrorWithCauses<E>
where
    E: Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut cur: &dyn Error = &self.0;
        while let Some(next) = cur.source() {
            cur = next;
            write!(f, ": {}", cur)?;
        }
        Ok(())
    }
}
