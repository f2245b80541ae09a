#![allow(dead_code)]

pub mod mock {
    use std::io::BufReader;

    use chartparse::dataset::conll;
    use chartparse::lang::Sentence;

    static CONLL_SAMPLE: &'static str = "\
1\tThe\t_\tDT\tDT\t_\t2\tdet\t_\t_
2\tdog\t_\tNN\tNN\t_\t3\tnsubj\t_\t_
3\tbarks\t_\tVBZ\tVBZ\t_\t0\troot\t_\t_

1\tJohn\t_\tNNP\tNNP\t_\t2\tnsubj\t_\t_
2\tloves\t_\tVBZ\tVBZ\t_\t0\troot\t_\t_
3\tMary\t_\tNNP\tNNP\t_\t2\tdobj\t_\t_
4\t.\t_\t.\t.\t_\t2\tpunct\t_\t_
";

    static CONLL_NONPROJECTIVE: &'static str = "\
1\tA\t_\tX\tX\t_\t3\tdep\t_\t_
2\tB\t_\tX\tX\t_\t4\tdep\t_\t_
3\tC\t_\tX\tX\t_\t0\troot\t_\t_
4\tD\t_\tX\tX\t_\t3\tdep\t_\t_
";

    pub fn provide_conll_sentences<'a>() -> Vec<Sentence<conll::Token<'a>>> {
        read_sentences(CONLL_SAMPLE)
    }

    pub fn provide_nonprojective_sentence<'a>() -> Sentence<conll::Token<'a>> {
        read_sentences(CONLL_NONPROJECTIVE).pop().unwrap()
    }

    pub fn read_sentences<'a>(text: &str) -> Vec<Sentence<conll::Token<'a>>> {
        let mut reader = BufReader::new(text.as_bytes());
        let mut buf = vec![];
        conll::read_upto(&mut reader, ::std::usize::MAX, &mut buf).unwrap();
        buf
    }
}
