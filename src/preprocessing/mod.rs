pub use self::text::*;
pub use self::vocab::*;

mod text;
mod vocab;

pub trait Preprocess<T> {
    type Output;

    fn fit<I: IntoIterator<Item = T>>(&mut self, xs: I) -> Vec<T> {
        let xs: Vec<T> = xs.into_iter().collect();
        for x in &xs {
            self.fit_each(x);
        }
        xs
    }

    #[allow(unused_variables)]
    fn fit_each(&mut self, x: &T) -> Option<Self::Output> {
        None
    }

    fn transform<I: IntoIterator<Item = T>>(&self, xs: I) -> Vec<Self::Output> {
        xs.into_iter().map(|x| self.transform_each(x)).collect()
    }

    fn transform_each(&self, x: T) -> Self::Output;

    fn fit_transform<I: IntoIterator<Item = T>>(&mut self, xs: I) -> Vec<Self::Output> {
        xs.into_iter().map(|x| self.fit_transform_each(x)).collect()
    }

    fn fit_transform_each(&mut self, x: T) -> Self::Output {
        match self.fit_each(&x) {
            Some(y) => y,
            None => self.transform_each(x),
        }
    }
}
