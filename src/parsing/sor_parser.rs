use crate::{
    Error, Result, SorFile,
    blocks::{
        BlockDescriptor, BlockKind, ChecksumResult, DataPoints, FixedParams, GeneralParams,
        KeyEvents, MapBlock, SorBlock, SupplierParams,
    },
    observer::{ParseObserver, ParseWarning},
    options::ParseOptions,
    parsing::ChecksumReader,
};
use std::io::{Read, Seek};

/// Single-pass decoder for one SOR source.
///
/// The map is decoded first; every other block is then visited in the order
/// the map declares, dispatched by name. The first failing block aborts the
/// parse and nothing decoded so far is returned.
pub(crate) struct SorParser<'a, R> {
    reader: ChecksumReader<R>,
    options: ParseOptions,
    observer: &'a mut dyn ParseObserver,
}

impl<'a, R: Read + Seek> SorParser<'a, R> {
    pub(crate) fn new(source: R, options: ParseOptions, observer: &'a mut dyn ParseObserver) -> Self {
        Self {
            reader: ChecksumReader::new(source),
            options,
            observer,
        }
    }

    pub(crate) fn parse(mut self) -> Result<SorFile> {
        let map = MapBlock::decode(&mut self.reader)?;
        let order: Vec<BlockDescriptor> = map.blocks_in_order().into_iter().cloned().collect();
        let mut sor = SorFile::from_map(map);

        for block in &order {
            self.observer.on_block(block);
            match BlockKind::from_name(&block.name) {
                Some(kind) => self.decode_block(kind, block, &mut sor)?,
                None => self.observer.on_warning(&ParseWarning::UnknownBlock {
                    name: block.name.clone(),
                }),
            }
        }

        Ok(sor)
    }

    fn decode_block(
        &mut self,
        kind: BlockKind,
        block: &BlockDescriptor,
        sor: &mut SorFile,
    ) -> Result<()> {
        let format = sor.format();
        let reader = &mut self.reader;

        match kind {
            BlockKind::GeneralParams => {
                sor.general_params = Some(GeneralParams::decode(reader, format, block)?);
            }
            BlockKind::SupplierParams => {
                sor.supplier_params = Some(SupplierParams::decode(reader, format, block)?);
            }
            BlockKind::FixedParams => {
                sor.fixed_params = Some(FixedParams::decode(reader, format, block)?);
            }
            BlockKind::DataPoints => {
                let fixed = require_fixed(sor, DataPoints::NAME)?;
                let (header, trace) = DataPoints::decode(
                    reader,
                    format,
                    block,
                    fixed,
                    &self.options,
                    &mut *self.observer,
                )?;
                sor.data_points = Some(header);
                sor.trace = trace;
            }
            BlockKind::KeyEvents => {
                let fixed = require_fixed(sor, KeyEvents::NAME)?;
                sor.key_events = Some(KeyEvents::decode(reader, format, block, fixed)?);
            }
            BlockKind::Checksum => {
                let result = ChecksumResult::decode(reader, format, block)?;
                if !result.matches {
                    self.observer.on_warning(&ParseWarning::ChecksumMismatch {
                        computed: result.computed,
                        stored: result.stored,
                    });
                }
                sor.checksum = Some(result);
            }
        }
        Ok(())
    }
}

fn require_fixed<'s>(sor: &'s SorFile, required_by: &'static str) -> Result<&'s FixedParams> {
    sor.fixed_params.as_ref().ok_or(Error::MissingBlock {
        block: FixedParams::NAME,
        required_by,
    })
}
